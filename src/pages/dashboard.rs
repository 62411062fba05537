//! Dashboard page: record totals and four bar charts.

use dioxus::prelude::*;
use registrar_core::{ChartPoint, DashboardSummary};

use crate::context::{report_error, use_console, use_data_revision, use_error_banner};
use crate::theme::colors;

#[component]
pub fn Dashboard() -> Element {
    let console = use_console();
    let data_revision = use_data_revision();
    let error = use_error_banner();

    let mut summary: Signal<Option<DashboardSummary>> = use_signal(|| None);

    use_effect(move || {
        let _ = data_revision();
        spawn(async move {
            let console = console.peek().clone();
            match console.dashboard().await {
                Ok(s) => summary.set(Some(s)),
                Err(e) => report_error(error, "Failed to load dashboard", e),
            }
        });
    });

    let Some(summary) = summary() else {
        return rsx! {
            h1 { class: "page-title", "Dashboard" }
            div { class: "empty-state", "Loading..." }
        };
    };

    rsx! {
        h1 { class: "page-title", "Dashboard" }

        div { class: "stat-cards",
            StatCard { label: "Students", value: summary.total_students }
            StatCard { label: "Departments", value: summary.total_departments }
            StatCard { label: "Courses", value: summary.total_courses }
            StatCard { label: "Enrollments", value: summary.total_enrollments }
        }

        div { class: "charts",
            BarChart {
                title: "Students per department",
                points: summary.students_per_department.clone(),
                color: colors::CHART_BARS[0],
            }
            BarChart {
                title: "Students per enrollment year",
                points: summary.students_per_year.clone(),
                color: colors::CHART_BARS[1],
            }
            BarChart {
                title: "Top courses by enrollment",
                points: summary.top_courses.clone(),
                color: colors::CHART_BARS[2],
            }
            BarChart {
                title: "Grade distribution",
                points: summary.grade_distribution.clone(),
                color: colors::CHART_BARS[3],
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: usize) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

/// Horizontal bar chart scaled to its largest value.
#[component]
fn BarChart(title: &'static str, points: Vec<ChartPoint>, color: &'static str) -> Element {
    let max = DashboardSummary::max_value(&points).max(1);

    rsx! {
        div { class: "chart",
            div { class: "chart-title", "{title}" }
            if points.is_empty() {
                div { class: "empty-state", "No data" }
            }
            for point in points {
                {
                    let width = format!("{:.1}%", point.value as f64 / max as f64 * 100.0);
                    rsx! {
                        div { key: "{point.label}", class: "chart-row",
                            span { "{point.label}" }
                            div {
                                class: "chart-bar",
                                style: "width: {width}; background: {color};",
                            }
                            span { class: "chart-value", "{point.value}" }
                        }
                    }
                }
            }
        }
    }
}
