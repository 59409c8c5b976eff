use crowdfund::views::create::{self, CreateCampaignForm, CreateScreen, SubmitOutcome};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::bridge::alert;
use super::{app_context, navigate, offset_at};

#[component]
pub(super) fn CreateCampaignPage() -> impl IntoView {
    let ctx = app_context();
    let form = RwSignal::new(CreateCampaignForm::default());
    let balance = RwSignal::new(None::<u64>);

    // Balance drives the faucet hint; refreshed when the wallet connects.
    Effect::new({
        let ctx = ctx.clone();
        move |_| {
            if !ctx.connected() {
                balance.set(None);
                return;
            }
            let wallet = ctx.wallet();
            spawn_local(async move {
                balance.set(create::load_balance(&wallet).await);
            });
        }
    });

    let submit = {
        let ctx = ctx.clone();
        move || {
            let connected = ctx.connected_untracked();
            let offset = form.with_untracked(|f| offset_at(f.deadline()));
            let mut begun = Err(create::CONTRACT_NOT_LOADED);
            form.update(|f| begun = f.begin_submit(connected, offset));
            let draft = match begun {
                Ok(d) => d,
                Err(message) => {
                    alert(message);
                    return;
                }
            };
            let contract = ctx.contract();
            spawn_local(async move {
                let result = create::create_campaign(&contract, draft).await;
                let mut outcome = None;
                form.update(|f| outcome = Some(f.finish_submit(result)));
                match outcome {
                    Some(SubmitOutcome::Navigate(route)) => navigate(&route),
                    Some(SubmitOutcome::Alert(message)) => alert(message),
                    None => {}
                }
            });
        }
    };

    let screen = {
        let ctx = ctx.clone();
        move || {
            let account = ctx.account();
            form.with(|f| f.render(ctx.connected(), balance.get(), account.as_ref(), ctx.cfg()))
        }
    };

    // Only the derived parts re-render; the inputs stay mounted while typing.
    let action = {
        let screen = screen.clone();
        move || match screen() {
            CreateScreen::Form {
                faucet: Some(url), ..
            } => view! {
                <p>
                    "Your wallet has no funds. "
                    <a href=url target="_blank" rel="noopener">
                        "Get testnet funds from the Fuel Faucet"
                    </a>
                </p>
            }
            .into_any(),
            CreateScreen::Form {
                submit_label,
                submit_disabled,
                ..
            } => view! {
                <button class="btn primary" type="submit" disabled=submit_disabled>
                    {submit_label}
                </button>
            }
            .into_any(),
            CreateScreen::ConnectPrompt => ().into_any(),
        }
    };

    let created = move || match screen() {
        CreateScreen::Form {
            created_id: Some(id),
            ..
        } => Some(view! { <p class="subtle">"Created campaign #"{id}</p> }),
        _ => None,
    };

    view! {
        <section class="create-page">
            <h2>"Create Campaign"</h2>
            <Show
                when={
                    let ctx = ctx.clone();
                    move || ctx.connected()
                }
                fallback=|| view! { <p>{create::CONNECT_PROMPT}</p> }
            >
                {
                    let submit = submit.clone();
                    let action = action.clone();
                    let created = created.clone();
                    view! {
                        <form
                            class="create-form"
                            on:submit=move |ev| {
                                ev.prevent_default();
                                submit();
                            }
                        >
                            <label>
                                "Target Goal (base units)"
                                <input
                                    type="text"
                                    inputmode="numeric"
                                    prop:value=move || form.with(|f| f.target_goal().to_string())
                                    on:input=move |ev| {
                                        let raw = event_target_value(&ev);
                                        form.update(|f| f.set_target_goal(&raw));
                                    }
                                />
                            </label>
                            <div class="subtle">{move || form.with(|f| f.goal_preview())}</div>
                            <label>
                                "Deadline"
                                <input
                                    type="datetime-local"
                                    prop:value=move || form.with(|f| f.deadline().to_string())
                                    on:input=move |ev| {
                                        let raw = event_target_value(&ev);
                                        form.update(|f| f.set_deadline(&raw));
                                    }
                                />
                            </label>
                            {action}
                            {created}
                        </form>
                    }
                }
            </Show>
        </section>
    }
}
