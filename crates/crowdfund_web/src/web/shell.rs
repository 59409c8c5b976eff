use crowdfund::campaign::Address;
use crowdfund::route::{MenuLink, Route};
use crowdfund::wallet::SessionBar;
use leptos::prelude::*;

use super::navigate;

#[component]
pub(super) fn Header(
    account: RwSignal<Option<Address>>,
    connecting: RwSignal<bool>,
    connect: Callback<()>,
) -> impl IntoView {
    let bar = move || SessionBar {
        connecting: connecting.get(),
        address: account.get(),
    };

    view! {
        <header class="app-header">
            <h1 class="brand">"Fuel Crowdfund"</h1>
            {move || {
                bar()
                    .connect_label()
                    .map(|label| {
                        view! {
                            <button
                                class="btn primary"
                                disabled=move || connecting.get()
                                on:click=move |_| connect.run(())
                            >
                                {label}
                            </button>
                        }
                    })
            }}
        </header>
    }
}

#[component]
pub(super) fn MainMenu(route: RwSignal<Route>) -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <nav class="main-menu">
            <button class="icon-btn" title="Menu" on:click=move |_| set_open.set(!open.get())>
                "☰"
            </button>
            <Show when=move || open.get()>
                <ul class="menu-items">
                    {MenuLink::all()
                        .iter()
                        .map(|&link| {
                            let target = link.route();
                            let active = {
                                let target = target.clone();
                                move || route.with(|r| *r == target)
                            };
                            view! {
                                <li>
                                    <button
                                        class=move || if active() { "menu-item active" } else { "menu-item" }
                                        on:click=move |_| {
                                            set_open.set(false);
                                            navigate(&target);
                                        }
                                    >
                                        {link.label()}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </nav>
    }
}

#[component]
pub(super) fn Footer(account: RwSignal<Option<Address>>, disconnect: Callback<()>) -> impl IntoView {
    let footer = move || {
        SessionBar {
            connecting: false,
            address: account.get(),
        }
        .footer()
    };

    view! {
        <footer class="app-footer">
            {move || {
                footer()
                    .map(|text| {
                        view! {
                            <span class="subtle">{text}</span>
                            <button class="btn sm ghost" on:click=move |_| disconnect.run(())>
                                "Disconnect"
                            </button>
                        }
                    })
            }}
        </footer>
    }
}
