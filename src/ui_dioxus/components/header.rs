use dioxus::prelude::*;

use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn Header() -> Element {
    let app = use_app();
    let mut auth = app.auth;
    let item_count = app.cart.read().item_count();
    let user = auth.read().current_user().cloned();

    rsx! {
        nav {
            class: "navbar",

            Link { class: "nav-brand", to: Route::Home {}, "Storefront" }

            div {
                class: "nav-menu",
                Link { class: "nav-item", to: Route::Home {}, "Home" }
                Link { class: "nav-item", to: Route::Products {}, "Products" }
                if user.is_some() {
                    Link { class: "nav-item", to: Route::Orders {}, "Orders" }
                }
            }

            div {
                class: "nav-actions",

                Link {
                    class: "nav-item cart-link",
                    to: Route::Cart {},
                    "Cart"
                    if item_count > 0 {
                        span { class: "cart-badge", "{item_count}" }
                    }
                }

                match user {
                    Some(user) => {
                        let initials = user.initials();
                        rsx! {
                            span { class: "avatar", title: "{user.name}", "{initials}" }
                            button {
                                class: "nav-item",
                                onclick: move |_| auth.write().logout(),
                                "Sign out"
                            }
                        }
                    }
                    None => rsx! {
                        Link { class: "nav-item", to: Route::Login {}, "Sign in" }
                    },
                }
            }
        }
    }
}
