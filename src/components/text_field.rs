use dioxus::prelude::*;

/// Labelled text input bound to a string signal.
#[component]
pub fn TextField(
    label: &'static str,
    mut value: Signal<String>,
    #[props(default = "text")] kind: &'static str,
    #[props(default = "")] placeholder: &'static str,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                r#type: kind,
                value: "{value}",
                placeholder,
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}
