use dioxus::prelude::*;

use crate::ui_dioxus::state::use_app;

/// Subtotal, tax, shipping and total for the current cart.
#[component]
pub fn CartSummary(#[props(default)] children: Element) -> Element {
    let app = use_app();
    let (subtotal, item_count) = {
        let cart = app.cart.read();
        (cart.total(), cart.item_count())
    };
    let totals = app.checkout.quote(subtotal);
    let subtotal = app.money(totals.subtotal);
    let tax = app.money(totals.tax);
    let total = app.money(totals.total);
    let shipping = if totals.shipping == 0.0 {
        "Free".to_string()
    } else {
        app.money(totals.shipping)
    };

    rsx! {
        div {
            class: "cart-summary",
            h3 { "Order summary" }
            div { class: "summary-row", span { "Items ({item_count})" } span { "{subtotal}" } }
            div { class: "summary-row", span { "Tax" } span { "{tax}" } }
            div { class: "summary-row", span { "Shipping" } span { "{shipping}" } }
            div { class: "summary-row total", span { "Total" } span { "{total}" } }
            {children}
        }
    }
}
