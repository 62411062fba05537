//! Navigation Header Component
//!
//! App title, links to each record page, and the SQL Debugger toggle.

use dioxus::prelude::*;

use crate::app::Route;
use crate::context::{use_console, use_log_revision};

/// Navigation location within the application
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NavLocation {
    Students,
    Departments,
    Courses,
    Enrollments,
    Faculty,
    Dashboard,
}

impl NavLocation {
    const ALL: [NavLocation; 6] = [
        NavLocation::Students,
        NavLocation::Departments,
        NavLocation::Courses,
        NavLocation::Enrollments,
        NavLocation::Faculty,
        NavLocation::Dashboard,
    ];

    /// Get the display name for this location
    pub fn display_name(&self) -> &'static str {
        match self {
            NavLocation::Students => "Students",
            NavLocation::Departments => "Departments",
            NavLocation::Courses => "Courses",
            NavLocation::Enrollments => "Enrollments",
            NavLocation::Faculty => "Faculty",
            NavLocation::Dashboard => "Dashboard",
        }
    }

    /// Get the route for this location
    pub fn route(&self) -> Route {
        match self {
            NavLocation::Students => Route::Students {},
            NavLocation::Departments => Route::Departments {},
            NavLocation::Courses => Route::Courses {},
            NavLocation::Enrollments => Route::Enrollments {},
            NavLocation::Faculty => Route::FacultyPage {},
            NavLocation::Dashboard => Route::Dashboard {},
        }
    }
}

/// Navigation Header component
///
/// - Left: "Registrar" title
/// - Center: one link per record page
/// - Right: SQL Debugger toggle with the number of logged queries
#[component]
pub fn NavHeader() -> Element {
    let console = use_console();
    let mut log_revision = use_log_revision();

    // Subscribe to log changes for the counter
    let _ = log_revision();
    let (is_open, query_count) = {
        let console = console.read();
        (console.panel().is_open(), console.panel().len())
    };

    let toggle_debugger = move |_| {
        let open = console.read().panel().toggle();
        tracing::debug!(open, "SQL debugger toggled");
        *log_revision.write() += 1;
    };

    rsx! {
        header { class: "nav-header",
            span { class: "nav-title", "Registrar" }

            nav { class: "nav-links",
                for location in NavLocation::ALL {
                    Link {
                        key: "{location.display_name()}",
                        to: location.route(),
                        class: "nav-link",
                        active_class: "active",
                        "{location.display_name()}"
                    }
                }
            }

            button {
                class: if is_open { "debug-toggle active" } else { "debug-toggle" },
                title: "Show the queries issued by each action",
                onclick: toggle_debugger,
                "SQL Debugger"
                span { class: "debug-count", "{query_count}" }
            }
        }
    }
}
