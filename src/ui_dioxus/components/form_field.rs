use dioxus::prelude::*;

#[component]
pub fn FormField(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
) -> Element {
    rsx! {
        label {
            class: "form-field",
            span { class: "form-label", "{label}" }
            input {
                r#type: "{kind}",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}
