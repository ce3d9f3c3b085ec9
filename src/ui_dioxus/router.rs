use dioxus::prelude::*;

use crate::ui_dioxus::components::Header;
use crate::ui_dioxus::views::*;

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},

        #[route("/products")]
        Products {},

        #[route("/cart")]
        Cart {},

        #[route("/checkout")]
        Checkout {},

        #[route("/orders")]
        Orders {},

        #[route("/login")]
        Login {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
fn Shell() -> Element {
    rsx! {
        div {
            class: "app-container",
            Header {}
            main {
                class: "main-content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! { HomeView {} }
}

#[component]
fn Products() -> Element {
    rsx! { ProductsView {} }
}

#[component]
fn Cart() -> Element {
    rsx! { CartView {} }
}

#[component]
fn Checkout() -> Element {
    rsx! { CheckoutView {} }
}

#[component]
fn Orders() -> Element {
    rsx! { OrdersView {} }
}

#[component]
fn Login() -> Element {
    rsx! { LoginView {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "empty-state",
            h2 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Home {}, "Back to the store" }
        }
    }
}
