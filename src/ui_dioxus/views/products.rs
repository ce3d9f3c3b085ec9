use dioxus::prelude::*;

use crate::domain::product::{ProductFilters, SortBy, SortOrder};
use crate::ui_dioxus::components::ProductGrid;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn ProductsView() -> Element {
    let app = use_app();
    let mut query = use_signal(String::new);
    let mut category_id = use_signal(String::new);
    let mut sort = use_signal(|| "featured".to_string());
    let mut in_stock_only = use_signal(|| false);

    let (sort_by, sort_order) = sort_choice(&sort.read());
    let filters = ProductFilters {
        category_id: Some(category_id()).filter(|c| !c.is_empty()),
        query: Some(query()).filter(|q| !q.trim().is_empty()),
        in_stock_only: in_stock_only(),
        sort_by,
        sort_order,
        ..Default::default()
    };
    let products: Vec<_> = app.catalog.filter(&filters).into_iter().cloned().collect();
    let categories = app.catalog.categories().to_vec();
    let count = products.len();

    rsx! {
        div {
            class: "toolbar",

            input {
                class: "search-input",
                placeholder: "Search products...",
                value: "{query}",
                oninput: move |evt: FormEvent| query.set(evt.value()),
            }

            select {
                value: "{category_id}",
                onchange: move |evt: FormEvent| category_id.set(evt.value()),
                option { value: "", "All categories" }
                for category in categories {
                    option { key: "{category.id}", value: "{category.id}", "{category.name}" }
                }
            }

            select {
                value: "{sort}",
                onchange: move |evt: FormEvent| sort.set(evt.value()),
                option { value: "featured", "Featured" }
                option { value: "price-asc", "Price: low to high" }
                option { value: "price-desc", "Price: high to low" }
                option { value: "rating", "Top rated" }
                option { value: "newest", "Newest" }
                option { value: "name", "Name" }
            }

            label {
                class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: in_stock_only(),
                    onchange: move |_| in_stock_only.toggle(),
                }
                "In stock only"
            }

            span { class: "muted", "{count} products" }
        }

        ProductGrid { products: products }
    }
}

fn sort_choice(value: &str) -> (Option<SortBy>, SortOrder) {
    match value {
        "price-asc" => (Some(SortBy::Price), SortOrder::Asc),
        "price-desc" => (Some(SortBy::Price), SortOrder::Desc),
        "rating" => (Some(SortBy::Rating), SortOrder::Desc),
        "newest" => (Some(SortBy::Newest), SortOrder::Asc),
        "name" => (Some(SortBy::Name), SortOrder::Asc),
        _ => (None, SortOrder::Asc),
    }
}
