//! Courses page. Courses are keyed by their code, which cannot change once
//! the course exists.

use dioxus::prelude::*;
use registrar_core::{Course, CourseDraft, CoursePatch, Resource};

use super::{changed, changed_opt, display_opt, non_empty, parse_optional, parse_required};
use crate::components::TextField;
use crate::context::{mark_changed, report_error, use_console, use_data_revision, use_error_banner};

#[component]
pub fn Courses() -> Element {
    let console = use_console();
    let data_revision = use_data_revision();
    let error = use_error_banner();

    let mut courses: Signal<Vec<Course>> = use_signal(Vec::new);
    let mut editing: Signal<Option<Course>> = use_signal(|| None);
    let mut code = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut credits = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut department_id = use_signal(String::new);
    let mut faculty_id = use_signal(String::new);

    use_effect(move || {
        let _ = data_revision();
        spawn(async move {
            let console = console.peek().clone();
            match console.courses().fetch_all().await {
                Ok(list) => courses.set(list),
                Err(e) => report_error(error, "Failed to load courses", e),
            }
        });
    });

    let mut reset_form = move || {
        editing.set(None);
        for mut field in [code, name, credits, description, department_id, faculty_id] {
            field.set(String::new());
        }
    };

    let save = move |_| async move {
        let parsed = parse_required::<u32>("Credits", &credits()).and_then(|credits| {
            let dept = parse_optional::<u64>("Department", &department_id())?;
            let instructor = parse_optional::<u64>("Faculty", &faculty_id())?;
            Ok((credits, dept, instructor))
        });
        let (credit_count, dept, instructor) = match parsed {
            Ok(v) => v,
            Err(e) => return report_error(error, "Invalid course", e),
        };

        let console = console.peek().clone();
        let result = match editing() {
            None => {
                console
                    .courses()
                    .create(CourseDraft {
                        code: code().trim().to_uppercase(),
                        name: name().trim().to_string(),
                        credits: credit_count,
                        description: non_empty(&description()),
                        department_id: dept,
                        faculty_id: instructor,
                    })
                    .await
            }
            Some(original) => {
                let patch = CoursePatch {
                    name: changed(name().trim().to_string(), &original.name),
                    credits: changed(credit_count, &original.credits),
                    description: changed_opt(non_empty(&description()), &original.description),
                    department_id: changed_opt(dept, &original.department_id),
                    faculty_id: changed_opt(instructor, &original.faculty_id),
                };
                if Course::patch_columns(&patch).is_empty() {
                    reset_form();
                    return;
                }
                console.courses().update(&original.code, patch).await
            }
        };

        match result {
            Ok(course) => {
                tracing::info!(code = %course.code, "course saved");
                reset_form();
                mark_changed(data_revision, error);
            }
            Err(e) => report_error(error, "Failed to save course", e),
        }
    };

    rsx! {
        h1 { class: "page-title", "Courses" }

        div { class: "record-form",
            if editing().is_none() {
                TextField { label: "Code", value: code, placeholder: "CS101" }
            }
            TextField { label: "Name", value: name }
            TextField { label: "Credits", value: credits }
            TextField { label: "Description", value: description }
            TextField { label: "Department id", value: department_id }
            TextField { label: "Faculty id", value: faculty_id }
            button { class: "btn", onclick: save,
                if editing().is_some() { "Save changes" } else { "Add course" }
            }
            if editing().is_some() {
                button { class: "btn btn-secondary", onclick: move |_| reset_form(), "Cancel" }
            }
        }

        if courses.read().is_empty() {
            div { class: "empty-state", "No courses yet." }
        } else {
            table { class: "record-table",
                thead {
                    tr {
                        th { "Code" }
                        th { "Name" }
                        th { "Credits" }
                        th { "Description" }
                        th {}
                    }
                }
                tbody {
                    for course in courses() {
                        {
                            let key = course.code.clone();
                            let summary = display_opt(&course.description);
                            let to_edit = course.clone();
                            rsx! {
                                tr { key: "{key}",
                                    td { "{course.code}" }
                                    td { "{course.name}" }
                                    td { "{course.credits}" }
                                    td { "{summary}" }
                                    td { class: "actions",
                                        button {
                                            class: "btn btn-small btn-secondary",
                                            onclick: move |_| {
                                                code.set(to_edit.code.clone());
                                                name.set(to_edit.name.clone());
                                                credits.set(to_edit.credits.to_string());
                                                description.set(display_opt(&to_edit.description));
                                                department_id.set(display_opt(&to_edit.department_id));
                                                faculty_id.set(display_opt(&to_edit.faculty_id));
                                                editing.set(Some(to_edit.clone()));
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-small btn-danger",
                                            onclick: move |_| {
                                                let key = key.clone();
                                                async move {
                                                    let console = console.peek().clone();
                                                    match console.courses().delete(&key).await {
                                                        Ok(()) => mark_changed(data_revision, error),
                                                        Err(e) => report_error(error, "Failed to delete course", e),
                                                    }
                                                }
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
