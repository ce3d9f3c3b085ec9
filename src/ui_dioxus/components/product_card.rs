use dioxus::prelude::*;

use crate::domain::product::Product;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn ProductGrid(products: Vec<Product>) -> Element {
    if products.is_empty() {
        return rsx! {
            div { class: "empty-state", "No products match these filters." }
        };
    }

    rsx! {
        div {
            class: "product-grid",
            for product in products {
                ProductCard { key: "{product.id}", product: product.clone() }
            }
        }
    }
}

#[component]
pub fn ProductCard(product: Product) -> Element {
    let app = use_app();
    let mut cart = app.cart;
    let in_cart = cart.read().quantity_of(&product.id);
    let price = app.money(product.price);
    let original = product.original_price.filter(|_| product.is_discounted()).map(|p| app.money(p));
    let rating = format!("{:.1}", product.rating);
    let cart_product = product.to_cart_product();

    rsx! {
        div {
            class: "product-card",

            img { class: "product-image", src: "{product.image}", alt: "{product.name}" }

            if let Some(percent) = product.discount_percent() {
                span { class: "discount-badge", "-{percent}%" }
            }

            div {
                class: "product-body",
                span { class: "product-brand", "{product.brand}" }
                h3 { class: "product-name", "{product.name}" }
                div {
                    class: "product-rating",
                    "★ {rating} ({product.review_count})"
                }
                div {
                    class: "product-price",
                    span { class: "price", "{price}" }
                    if let Some(original) = original {
                        span { class: "original-price", "{original}" }
                    }
                }

                if product.in_stock {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| cart.write().add_one(cart_product.clone()),
                        if in_cart > 0 { "Add another ({in_cart} in cart)" } else { "Add to cart" }
                    }
                } else {
                    button { class: "btn", disabled: true, "Out of stock" }
                }
            }
        }
    }
}
