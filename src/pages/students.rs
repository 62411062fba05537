//! Students page: searchable table with an add/edit form.

use dioxus::prelude::*;
use registrar_core::{Department, Resource, Student, StudentDraft, StudentPatch};

use super::{changed, changed_opt, display_opt, non_empty, parse_optional};
use crate::components::TextField;
use crate::context::{mark_changed, report_error, use_console, use_data_revision, use_error_banner};

#[component]
pub fn Students() -> Element {
    let console = use_console();
    let data_revision = use_data_revision();
    let error = use_error_banner();

    let mut students: Signal<Vec<Student>> = use_signal(Vec::new);
    let mut departments: Signal<Vec<Department>> = use_signal(Vec::new);
    let mut search = use_signal(String::new);
    let mut editing: Signal<Option<Student>> = use_signal(|| None);

    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut department_id = use_signal(String::new);
    let mut enrollment_year = use_signal(String::new);

    // Reload whenever records change
    use_effect(move || {
        let _ = data_revision();
        spawn(async move {
            let console = console.peek().clone();
            match console.students().fetch_all().await {
                Ok(list) => students.set(list),
                Err(e) => report_error(error, "Failed to load students", e),
            }
            match console.departments().fetch_all().await {
                Ok(list) => departments.set(list),
                Err(e) => report_error(error, "Failed to load departments", e),
            }
        });
    });

    let mut reset_form = move || {
        editing.set(None);
        for mut field in [first_name, last_name, email, phone, department_id, enrollment_year] {
            field.set(String::new());
        }
    };

    let mut start_edit = move |student: Student| {
        first_name.set(student.first_name.clone());
        last_name.set(student.last_name.clone());
        email.set(student.email.clone());
        phone.set(display_opt(&student.phone));
        department_id.set(display_opt(&student.department_id));
        enrollment_year.set(display_opt(&student.enrollment_year));
        editing.set(Some(student));
    };

    let save = move |_| async move {
        let dept = match parse_optional::<u64>("Department", &department_id()) {
            Ok(v) => v,
            Err(e) => return report_error(error, "Invalid student", e),
        };
        let year = match parse_optional::<i32>("Enrollment year", &enrollment_year()) {
            Ok(v) => v,
            Err(e) => return report_error(error, "Invalid student", e),
        };

        let console = console.peek().clone();
        let result = match editing() {
            None => console
                .students()
                .create(StudentDraft {
                    first_name: first_name().trim().to_string(),
                    last_name: last_name().trim().to_string(),
                    email: email().trim().to_string(),
                    phone: non_empty(&phone()),
                    department_id: dept,
                    enrollment_year: year,
                })
                .await,
            Some(original) => {
                let patch = StudentPatch {
                    first_name: changed(first_name().trim().to_string(), &original.first_name),
                    last_name: changed(last_name().trim().to_string(), &original.last_name),
                    email: changed(email().trim().to_string(), &original.email),
                    phone: changed_opt(non_empty(&phone()), &original.phone),
                    department_id: changed_opt(dept, &original.department_id),
                    enrollment_year: changed_opt(year, &original.enrollment_year),
                };
                if Student::patch_columns(&patch).is_empty() {
                    reset_form();
                    return;
                }
                console.students().update(&original.id, patch).await
            }
        };

        match result {
            Ok(student) => {
                tracing::info!(id = student.id, "student saved");
                reset_form();
                mark_changed(data_revision, error);
            }
            Err(e) => report_error(error, "Failed to save student", e),
        }
    };

    let query = search();
    let visible: Vec<Student> = students()
        .into_iter()
        .filter(|s| s.matches(&query))
        .collect();
    let department_name = move |id: Option<u64>| -> String {
        id.and_then(|id| departments.read().iter().find(|d| d.id == id).map(|d| d.name.clone()))
            .unwrap_or_default()
    };

    rsx! {
        h1 { class: "page-title", "Students" }

        div { class: "record-form",
            TextField { label: "First name", value: first_name }
            TextField { label: "Last name", value: last_name }
            TextField { label: "Email", value: email, kind: "email" }
            TextField { label: "Phone", value: phone }
            TextField { label: "Department id", value: department_id }
            TextField { label: "Enrollment year", value: enrollment_year }
            button { class: "btn", onclick: save,
                if editing().is_some() { "Save changes" } else { "Add student" }
            }
            if editing().is_some() {
                button { class: "btn btn-secondary", onclick: move |_| reset_form(), "Cancel" }
            }
        }

        input {
            class: "search-input",
            placeholder: "Search by name or email",
            value: "{search}",
            oninput: move |evt| search.set(evt.value()),
        }

        if visible.is_empty() {
            div { class: "empty-state", "No students found." }
        } else {
            table { class: "record-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Email" }
                        th { "Department" }
                        th { "Year" }
                        th {}
                    }
                }
                tbody {
                    for student in visible {
                        {
                            let id = student.id;
                            let dept = department_name(student.department_id);
                            let year = display_opt(&student.enrollment_year);
                            let name = student.full_name();
                            let to_edit = student.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{id}" }
                                    td { "{name}" }
                                    td { "{student.email}" }
                                    td { "{dept}" }
                                    td { "{year}" }
                                    td { class: "actions",
                                        button {
                                            class: "btn btn-small btn-secondary",
                                            onclick: move |_| start_edit(to_edit.clone()),
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-small btn-danger",
                                            onclick: move |_| async move {
                                                let console = console.peek().clone();
                                                match console.students().delete(&id).await {
                                                    Ok(()) => mark_changed(data_revision, error),
                                                    Err(e) => report_error(error, "Failed to delete student", e),
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
