use crowdfund::amount::AmountDisplay;
use crowdfund::campaign::CampaignCard;
use crowdfund::route::Route;
use crowdfund::views::detail::{CampaignDetailView, ContributeDialog};
use leptos::prelude::*;

use super::navigate;

/// Label, formatted value and the raw base-unit count.
#[component]
pub(super) fn CampaignAmount(amount: AmountDisplay) -> impl IntoView {
    view! {
        <div class="amount">
            <span class="amount-label">{amount.label}": "</span>
            <span class="amount-value">{amount.value_line()}</span>
            " "
            <span class="amount-raw subtle">{amount.base_units_hint()}</span>
        </div>
    }
}

#[component]
pub(super) fn CampaignCardView(
    card: CampaignCard,
    #[prop(optional)] with_details_link: bool,
) -> impl IntoView {
    let details = Route::CampaignDetails(card.id.to_string());
    let link = with_details_link.then(|| {
        view! {
            <a
                href=format!("#{}", card.details_path)
                on:click=move |ev| {
                    ev.prevent_default();
                    navigate(&details);
                }
            >
                "View details"
            </a>
        }
    });

    view! {
        <article class="campaign-card">
            <h3>{card.title}</h3>
            <div class="subtle">"Owner: "{card.owner_short}</div>
            <CampaignAmount amount=card.goal />
            <CampaignAmount amount=card.raised />
            <div>"Deadline: "{card.deadline}</div>
            {link}
        </article>
    }
}

/// Modal amount entry for a contribution.
#[component]
pub(super) fn ContributeModal(
    view_state: RwSignal<CampaignDetailView>,
    on_send: Callback<()>,
) -> impl IntoView {
    let pending = move || view_state.with(|v| v.contribution.is_loading());
    let amount = move || view_state.with(|v| v.dialog.amount().to_string());
    let preview = move || view_state.with(|v| v.dialog.preview());
    let can_send = move || view_state.with(|v| v.dialog.can_send(v.contribution.is_loading()));

    view! {
        <Show when=move || view_state.with(|v| v.dialog.is_open())>
            <div class="modal-overlay">
                <div class="modal">
                    <h3>"Contribute"</h3>
                    <label>
                        "Amount (base units)"
                        <input
                            type="text"
                            inputmode="numeric"
                            prop:value=amount
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                view_state.update(|v| v.dialog.set_amount(&raw));
                            }
                        />
                    </label>
                    <div class="subtle">{preview}</div>
                    <div class="modal-actions">
                        <button
                            class="btn ghost"
                            disabled=pending
                            on:click=move |_| {
                                view_state.update(|v| {
                                    v.cancel_dialog();
                                })
                            }
                        >
                            "Cancel"
                        </button>
                        <button
                            class="btn primary"
                            disabled=move || !can_send()
                            on:click=move |_| on_send.run(())
                        >
                            {move || ContributeDialog::send_label(pending())}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
