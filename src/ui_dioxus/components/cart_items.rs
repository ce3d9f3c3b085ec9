use dioxus::prelude::*;

use crate::domain::cart::LineItem;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn CartItemRow(item: LineItem) -> Element {
    let app = use_app();
    let mut cart = app.cart;
    let unit_price = app.money(item.price);
    let line_total = app.money(item.line_total());
    let quantity = i64::from(item.quantity);

    let dec_id = item.id.clone();
    let inc_id = item.id.clone();
    let input_id = item.id.clone();
    let remove_id = item.id.clone();

    rsx! {
        div {
            class: "cart-row",

            img { class: "cart-thumb", src: "{item.image}", alt: "{item.name}" }

            div {
                class: "cart-row-info",
                h4 { "{item.name}" }
                span { class: "muted", "{item.category}" }
                span { class: "price", "{unit_price}" }
            }

            div {
                class: "quantity-control",
                button {
                    onclick: move |_| cart.write().update_quantity(&dec_id, quantity - 1),
                    "−"
                }
                input {
                    r#type: "number",
                    min: "0",
                    value: "{item.quantity}",
                    onchange: move |evt: FormEvent| {
                        // Unparseable input leaves the line untouched
                        if let Ok(next) = evt.value().trim().parse::<i64>() {
                            cart.write().update_quantity(&input_id, next);
                        }
                    },
                }
                button {
                    onclick: move |_| cart.write().update_quantity(&inc_id, quantity + 1),
                    "+"
                }
            }

            span { class: "line-total", "{line_total}" }

            button {
                class: "btn btn-link",
                onclick: move |_| cart.write().remove(&remove_id),
                "Remove"
            }
        }
    }
}
