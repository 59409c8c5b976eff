use crowdfund::views::detail::{self, CampaignDetailView, DetailScreen};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::bridge::alert;
use super::components::{CampaignCardView, ContributeModal};
use super::{app_context, local_offset};

#[component]
pub(super) fn CampaignDetailPage(raw_id: String) -> impl IntoView {
    let ctx = app_context();
    let view_state = RwSignal::new(CampaignDetailView::new(&raw_id));

    // Load on mount and whenever the wallet connects. Invalid ids never call.
    Effect::new({
        let ctx = ctx.clone();
        move |_| {
            let connected = ctx.connected();
            let mut id = None;
            view_state.update(|v| id = v.begin_load(connected));
            if let Some(id) = id {
                let contract = ctx.contract();
                spawn_local(async move {
                    let state = detail::load_campaign(&contract, id).await;
                    view_state.update(|v| v.finish_load(state));
                });
            }
        }
    });

    let open_dialog = {
        let ctx = ctx.clone();
        move || {
            let connected = ctx.connected_untracked();
            let mut result = Ok(());
            view_state.update(|v| result = v.open_dialog(connected));
            if let Err(message) = result {
                alert(message);
            }
        }
    };

    let on_send = Callback::new({
        let ctx = ctx.clone();
        move |_: ()| {
            let mut args = None;
            view_state.update(|v| args = v.begin_contribution());
            let Some((id, amount)) = args else {
                return;
            };
            let wallet = ctx.wallet();
            let contract = ctx.contract();
            spawn_local(async move {
                let outcome = detail::contribute(&wallet, &contract, id, amount).await;
                view_state.update(|v| v.finish_contribution(outcome));
            });
        }
    });

    let screen = {
        let ctx = ctx.clone();
        move || view_state.with(|v| v.render(ctx.connected(), local_offset()))
    };

    view! {
        <section class="detail-page">
            <h2>{move || view_state.with(|v| v.heading())}</h2>
            {move || match screen() {
                DetailScreen::ConnectPrompt => view! { <p>{detail::CONNECT_PROMPT}</p> }.into_any(),
                DetailScreen::InvalidId => {
                    view! { <p class="error">{detail::INVALID_ID_MESSAGE}</p> }.into_any()
                }
                DetailScreen::Loading => view! { <p class="subtle">"Loading…"</p> }.into_any(),
                DetailScreen::Error(e) => view! { <p class="error">{e}</p> }.into_any(),
                DetailScreen::NotFound => view! { <p>{detail::NOT_FOUND_MESSAGE}</p> }.into_any(),
                DetailScreen::Loaded { card, notice, contributing } => {
                    let open_dialog = open_dialog.clone();
                    view! {
                        <CampaignCardView card=card />
                        {notice.map(|n| view! { <p class="error">{n}</p> })}
                        <button
                            class="btn primary"
                            disabled=contributing
                            on:click=move |_| open_dialog()
                        >
                            "Contribute"
                        </button>
                    }
                        .into_any()
                }
            }}
            <ContributeModal view_state=view_state on_send=on_send />
        </section>
    }
}
