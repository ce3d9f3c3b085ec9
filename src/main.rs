use storefront::ui_dioxus::App;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dioxus_desktop::{Config, WindowBuilder};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let window = WindowBuilder::new()
        .with_title("Storefront")
        .with_inner_size(dioxus_desktop::LogicalSize::new(1280.0, 860.0));

    dioxus_desktop::launch::launch(App, vec![], Config::default().with_window(window));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    dioxus::prelude::LaunchBuilder::web().launch(App);
}
