use std::sync::Arc;

use dioxus::prelude::*;
use registrar_core::Console;
use tokio::sync::broadcast::error::RecvError;

use crate::components::{ErrorBannerView, NavHeader, SqlDebuggerPanel};
use crate::context::{ConsoleHandle, DataRevision, ErrorBanner, LogRevision, SharedConsole};
use crate::pages::{Courses, Dashboard, Departments, Enrollments, FacultyPage, Students};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Students table, search and form
/// - `/departments`, `/courses`, `/enrollments`, `/faculty` - record pages
/// - `/dashboard` - aggregated charts
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Students {},
        #[route("/departments")]
        Departments {},
        #[route("/courses")]
        Courses {},
        #[route("/enrollments")]
        Enrollments {},
        #[route("/faculty")]
        FacultyPage {},
        #[route("/dashboard")]
        Dashboard {},
}

/// Root application component.
///
/// Opens the console, provides it with the UI signals as context, and
/// keeps the log revision in step with the query log.
#[component]
pub fn App() -> Element {
    let console = use_hook(|| {
        Console::from_config(crate::get_console_config())
            .map(|c| ConsoleHandle(Arc::new(c)))
            .map_err(|e| e.to_string())
    });

    match console {
        Ok(console) => rsx! {
            ConsoleRoot { console }
        },
        Err(e) => rsx! {
            style { {GLOBAL_STYLES} }
            main { class: "fatal",
                h1 { "Registrar could not start" }
                p { "{e}" }
            }
        },
    }
}

#[component]
fn ConsoleRoot(console: ConsoleHandle) -> Element {
    let console: Signal<SharedConsole> = use_signal(|| console.0);
    let mut log_revision = use_signal(|| 0u64);
    let mut data_revision = use_signal(|| 0u64);
    let error: Signal<Option<String>> = use_signal(|| None);

    use_context_provider(|| console);
    use_context_provider(|| LogRevision(log_revision));
    use_context_provider(|| DataRevision(data_revision));
    use_context_provider(|| ErrorBanner(error));

    // Follow the query log so the debugger panel re-renders on every entry
    use_effect(move || {
        spawn(async move {
            let mut rx = console.peek().logger().subscribe_channel();
            loop {
                match rx.recv().await {
                    Ok(_) | Err(RecvError::Lagged(_)) => *log_revision.write() += 1,
                    Err(RecvError::Closed) => break,
                }
            }
        });
    });

    // Optional sample data
    use_effect(move || {
        if crate::get_seed_demo() {
            spawn(async move {
                let console = console.peek().clone();
                match console.seed_demo().await {
                    Ok(0) => {}
                    Ok(created) => {
                        tracing::info!("Seeded {} demo records", created);
                        *data_revision.write() += 1;
                    }
                    Err(e) => tracing::error!("Failed to seed demo records: {}", e),
                }
            });
        }
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}

/// Page frame: header, error banner, the routed page, and the debugger panel.
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "shell",
            NavHeader {}
            div { class: "shell-body",
                main { class: "page",
                    ErrorBannerView {}
                    Outlet::<Route> {}
                }
                SqlDebuggerPanel {}
            }
        }
    }
}
