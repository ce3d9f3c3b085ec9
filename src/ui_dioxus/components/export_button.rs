use dioxus::prelude::*;

use crate::services::{ExportFormat, UserErrorFormatter};
use crate::ui_dioxus::state::{AppContext, use_app};

#[component]
pub fn ExportButton(user_id: String) -> Element {
    let app = use_app();
    let mut show_menu = use_signal(|| false);
    let mut export_message = use_signal(|| None::<String>);

    let export_json = {
        let app = app.clone();
        let user_id = user_id.clone();
        move |_: MouseEvent| {
            show_menu.set(false);
            export_message.set(Some(run_export(&app, &user_id, ExportFormat::Json)));
        }
    };
    let export_csv = move |_: MouseEvent| {
        show_menu.set(false);
        export_message.set(Some(run_export(&app, &user_id, ExportFormat::Csv)));
    };

    rsx! {
        div {
            class: "export-menu",

            button {
                class: "btn",
                onclick: move |_| show_menu.toggle(),
                "Export orders"
            }

            if show_menu() {
                div {
                    class: "dropdown",
                    button { onclick: export_json, "JSON" }
                    button { onclick: export_csv, "CSV" }
                }
            }

            if let Some(message) = export_message() {
                div {
                    class: "export-message",
                    onclick: move |_| export_message.set(None),
                    "{message}"
                }
            }
        }
    }
}

fn run_export(app: &AppContext, user_id: &str, format: ExportFormat) -> String {
    let filename = format!(
        "orders_export_{}.{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = app.config.data_dir.join(filename);

    match app.exports.export_to_file(user_id, format, &path) {
        Ok(()) => format!("Exported to {}", path.display()),
        Err(e) => format!("Export failed: {}", UserErrorFormatter::format_for_ui(&e)),
    }
}
