use dioxus::prelude::*;

use crate::context::use_error_banner;

/// Dismissable banner showing the last failed action.
#[component]
pub fn ErrorBannerView() -> Element {
    let mut error = use_error_banner();

    let Some(message) = error() else {
        return rsx! {};
    };

    rsx! {
        div { class: "error-banner", role: "alert",
            span { "{message}" }
            button {
                class: "btn btn-icon",
                onclick: move |_| error.set(None),
                "\u{2715}"
            }
        }
    }
}
