use dioxus::prelude::*;

use crate::domain::order::Order;
use crate::ui_dioxus::components::ExportButton;
use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn OrdersView() -> Element {
    let app = use_app();
    let Some(user) = app.auth.read().current_user().cloned() else {
        return rsx! {
            div {
                class: "empty-state",
                h2 { "Sign in to see your orders" }
                Link { class: "btn btn-primary", to: Route::Login {}, "Sign in" }
            }
        };
    };

    let orders = app.repository.orders.list_for_user(&user.id);
    if orders.is_empty() {
        return rsx! {
            div {
                class: "empty-state",
                h2 { "No orders yet" }
                Link { class: "btn btn-primary", to: Route::Products {}, "Start shopping" }
            }
        };
    }

    rsx! {
        div {
            class: "page-header",
            h1 { "Your orders" }
            ExportButton { user_id: user.id.clone() }
        }

        for order in orders {
            OrderCard { key: "{order.id}", order: order.clone() }
        }
    }
}

#[component]
fn OrderCard(order: Order) -> Element {
    let app = use_app();
    let placed_at = order.created_at.format("%b %d, %Y %H:%M").to_string();
    let total = app.money(order.totals.total);
    let item_count = order.item_count();

    rsx! {
        div {
            class: "order-card",
            div {
                class: "order-header",
                strong { "{order.id}" }
                span { class: "status status-{order.status}", "{order.status}" }
                span { class: "muted", "{placed_at}" }
            }
            ul {
                class: "order-lines",
                for item in order.items.iter() {
                    li {
                        key: "{item.id}",
                        "{item.quantity} × {item.name}"
                    }
                }
            }
            div {
                class: "order-footer",
                span { "{item_count} items" }
                span { class: "price", "{total}" }
            }
        }
    }
}
