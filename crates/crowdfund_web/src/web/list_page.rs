use crowdfund::views::list::{self, ListScreen, ListState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::components::CampaignCardView;
use super::{app_context, local_offset};

#[component]
pub(super) fn ListCampaignsPage() -> impl IntoView {
    let ctx = app_context();
    let state = RwSignal::new(ListState::default());

    let refresh = {
        let ctx = ctx.clone();
        move || {
            if !ctx.connected_untracked() {
                return;
            }
            state.update(|s| s.begin_refresh());
            let contract = ctx.contract();
            spawn_local(async move {
                let result = list::fetch_campaigns(&contract).await;
                state.update(|s| s.finish_refresh(result));
            });
        }
    };

    // Fetch on mount and whenever the wallet connects.
    Effect::new({
        let ctx = ctx.clone();
        let refresh = refresh.clone();
        move |_| {
            if ctx.connected() {
                refresh();
            }
        }
    });

    let screen = {
        let ctx = ctx.clone();
        move || state.with(|s| list::render(ctx.connected(), s, local_offset()))
    };

    view! {
        <section class="list-page">
            <div class="page-header">
                <h2>"Campaigns"</h2>
                <Show when={
                    let ctx = ctx.clone();
                    move || ctx.connected()
                }>
                    {
                        let refresh = refresh.clone();
                        view! {
                            <button
                                class="btn sm"
                                disabled=move || state.with(ListState::is_loading)
                                on:click=move |_| refresh()
                            >
                                {move || state.with(list::refresh_label)}
                            </button>
                        }
                    }
                </Show>
            </div>
            {move || match screen() {
                ListScreen::ConnectPrompt => view! { <p>{list::CONNECT_PROMPT}</p> }.into_any(),
                ListScreen::Loading => view! { <p class="subtle">"Loading…"</p> }.into_any(),
                ListScreen::Error(e) => view! { <p class="error">{e}</p> }.into_any(),
                ListScreen::Empty => view! { <p>{list::EMPTY_MESSAGE}</p> }.into_any(),
                ListScreen::Cards(cards) => {
                    view! {
                        <div class="campaign-grid">
                            {cards
                                .into_iter()
                                .map(|card| view! { <CampaignCardView card=card with_details_link=true /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
