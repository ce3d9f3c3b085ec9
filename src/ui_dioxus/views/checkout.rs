use dioxus::prelude::*;

use crate::domain::order::Order;
use crate::services::validation::InputFormatter;
use crate::services::{CheckoutForm, UserErrorFormatter};
use crate::ui_dioxus::components::{CartSummary, FormField};
use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn CheckoutView() -> Element {
    let app = use_app();
    let user = app.auth.read().current_user().cloned();
    let cart_empty = app.cart.read().is_empty();
    let placed = use_signal(|| None::<Order>);

    if let Some(order) = placed() {
        return rsx! { OrderConfirmation { order: order } };
    }

    let Some(user) = user else {
        return rsx! {
            div {
                class: "empty-state",
                h2 { "Sign in to check out" }
                Link { class: "btn btn-primary", to: Route::Login {}, "Sign in" }
            }
        };
    };

    if cart_empty {
        return rsx! {
            div {
                class: "empty-state",
                h2 { "Your cart is empty" }
                Link { class: "btn btn-primary", to: Route::Products {}, "Browse products" }
            }
        };
    }

    rsx! { CheckoutPanel { initial: CheckoutForm::for_user(&user), placed: placed } }
}

#[component]
fn CheckoutPanel(initial: CheckoutForm, placed: Signal<Option<Order>>) -> Element {
    let app = use_app();
    let mut form = use_signal(move || initial);
    let mut processing = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_: FormEvent| {
        if processing() {
            return;
        }
        // Set before spawning so a second submit is refused straight away
        processing.set(true);
        error.set(None);
        let app = app.clone();
        let mut placed = placed;
        spawn(async move {
            let Some(user) = app.auth.read().current_user().cloned() else {
                error.set(Some("Please sign in to continue.".to_string()));
                processing.set(false);
                return;
            };
            let items = app.cart.read().items().to_vec();
            let submitted = form.read().clone();

            // The cart is only borrowed again once the order is recorded
            match app.checkout.create_order(&user, &items, &submitted).await {
                Ok(order) => {
                    let mut cart = app.cart;
                    cart.write().settle(&items);
                    placed.set(Some(order));
                }
                Err(e) => error.set(Some(UserErrorFormatter::format_for_ui(&e))),
            }
            processing.set(false);
        });
    };

    let current = form.read().clone();

    rsx! {
        h1 { "Checkout" }

        div {
            class: "checkout-layout",

            form {
                class: "checkout-form",
                prevent_default: "onsubmit",
                onsubmit: submit,

                fieldset {
                    legend { "Contact" }
                    FormField {
                        label: "Email",
                        kind: "email",
                        value: current.email.clone(),
                        oninput: move |v| form.write().email = v,
                    }
                }

                fieldset {
                    legend { "Shipping address" }
                    div {
                        class: "form-row",
                        FormField {
                            label: "First name",
                            value: current.shipping.first_name.clone(),
                            oninput: move |v| form.write().shipping.first_name = v,
                        }
                        FormField {
                            label: "Last name",
                            value: current.shipping.last_name.clone(),
                            oninput: move |v| form.write().shipping.last_name = v,
                        }
                    }
                    FormField {
                        label: "Address",
                        value: current.shipping.street.clone(),
                        oninput: move |v| form.write().shipping.street = v,
                    }
                    div {
                        class: "form-row",
                        FormField {
                            label: "City",
                            value: current.shipping.city.clone(),
                            oninput: move |v| form.write().shipping.city = v,
                        }
                        FormField {
                            label: "State",
                            value: current.shipping.state.clone(),
                            oninput: move |v| form.write().shipping.state = v,
                        }
                        FormField {
                            label: "ZIP code",
                            value: current.shipping.zip_code.clone(),
                            oninput: move |v| form.write().shipping.zip_code = v,
                        }
                    }
                    FormField {
                        label: "Phone (optional)",
                        kind: "tel",
                        value: current.shipping.phone.clone().unwrap_or_default(),
                        oninput: move |v: String| form.write().shipping.phone = Some(v),
                    }
                }

                fieldset {
                    legend { "Payment" }
                    FormField {
                        label: "Card number",
                        placeholder: "1234 5678 9012 3456",
                        value: current.card.number.clone(),
                        oninput: move |v: String| form.write().card.number = InputFormatter::card_number(&v),
                    }
                    div {
                        class: "form-row",
                        FormField {
                            label: "Expiry",
                            placeholder: "MM/YY",
                            value: current.card.expiry.clone(),
                            oninput: move |v: String| form.write().card.expiry = InputFormatter::expiry(&v),
                        }
                        FormField {
                            label: "CVV",
                            placeholder: "123",
                            value: current.card.cvv.clone(),
                            oninput: move |v: String| form.write().card.cvv = InputFormatter::cvv(&v),
                        }
                    }
                    FormField {
                        label: "Name on card",
                        value: current.card.name_on_card.clone(),
                        oninput: move |v| form.write().card.name_on_card = v,
                    }
                }

                if let Some(message) = error() {
                    div { class: "form-error", "{message}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: processing(),
                    if processing() { "Processing payment..." } else { "Place order" }
                }
            }

            CartSummary {}
        }
    }
}

#[component]
fn OrderConfirmation(order: Order) -> Element {
    let app = use_app();
    let total = app.money(order.totals.total);
    let card = order.payment.last4.clone().unwrap_or_default();
    let ship_to = order.shipping_address.one_line();
    let name = order.shipping_address.full_name();

    rsx! {
        div {
            class: "confirmation",
            h1 { "Thank you for your order" }
            p { "Order " strong { "{order.id}" } " is {order.status}." }
            p { "Charged {total} to the card ending in {card}." }
            p { "Shipping to {name}, {ship_to}." }
            div {
                class: "confirmation-actions",
                Link { class: "btn btn-primary", to: Route::Orders {}, "View orders" }
                Link { class: "btn", to: Route::Products {}, "Keep shopping" }
            }
        }
    }
}
