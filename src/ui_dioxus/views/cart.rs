use dioxus::prelude::*;

use crate::ui_dioxus::components::{CartItemRow, CartSummary};
use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn CartView() -> Element {
    let app = use_app();
    let mut cart = app.cart;
    let items = cart.read().items().to_vec();
    let persisted = cart.read().is_persisted();

    if items.is_empty() {
        return rsx! {
            div {
                class: "empty-state",
                h2 { "Your cart is empty" }
                Link { class: "btn btn-primary", to: Route::Products {}, "Continue shopping" }
            }
        };
    }

    rsx! {
        h1 { "Shopping cart" }

        if !persisted {
            div {
                class: "warning-banner",
                "Your cart could not be saved. Changes will be lost when the app closes."
            }
        }

        div {
            class: "cart-layout",

            div {
                class: "cart-items",
                for item in items {
                    CartItemRow { key: "{item.id}", item: item.clone() }
                }
                button {
                    class: "btn btn-link",
                    onclick: move |_| cart.write().clear(),
                    "Clear cart"
                }
            }

            CartSummary {
                Link { class: "btn btn-primary", to: Route::Checkout {}, "Proceed to checkout" }
                Link { class: "btn", to: Route::Products {}, "Continue shopping" }
            }
        }
    }
}
