use dioxus::prelude::*;
use registrar_core::{Faculty, FacultyDraft, FacultyPatch, Resource};

use super::{changed, changed_opt, display_opt, non_empty, parse_optional};
use crate::components::TextField;
use crate::context::{mark_changed, report_error, use_console, use_data_revision, use_error_banner};

#[component]
pub fn FacultyPage() -> Element {
    let console = use_console();
    let data_revision = use_data_revision();
    let error = use_error_banner();

    let mut faculty: Signal<Vec<Faculty>> = use_signal(Vec::new);
    let mut editing: Signal<Option<Faculty>> = use_signal(|| None);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut designation = use_signal(String::new);
    let mut department_id = use_signal(String::new);

    use_effect(move || {
        let _ = data_revision();
        spawn(async move {
            let console = console.peek().clone();
            match console.faculty().fetch_all().await {
                Ok(list) => faculty.set(list),
                Err(e) => report_error(error, "Failed to load faculty", e),
            }
        });
    });

    let mut reset_form = move || {
        editing.set(None);
        for mut field in [first_name, last_name, email, designation, department_id] {
            field.set(String::new());
        }
    };

    let save = move |_| async move {
        let dept = match parse_optional::<u64>("Department", &department_id()) {
            Ok(v) => v,
            Err(e) => return report_error(error, "Invalid faculty member", e),
        };

        let console = console.peek().clone();
        let result = match editing() {
            None => {
                console
                    .faculty()
                    .create(FacultyDraft {
                        first_name: first_name().trim().to_string(),
                        last_name: last_name().trim().to_string(),
                        email: email().trim().to_string(),
                        designation: non_empty(&designation()),
                        department_id: dept,
                    })
                    .await
            }
            Some(original) => {
                let patch = FacultyPatch {
                    first_name: changed(first_name().trim().to_string(), &original.first_name),
                    last_name: changed(last_name().trim().to_string(), &original.last_name),
                    email: changed(email().trim().to_string(), &original.email),
                    designation: changed_opt(non_empty(&designation()), &original.designation),
                    department_id: changed_opt(dept, &original.department_id),
                };
                if Faculty::patch_columns(&patch).is_empty() {
                    reset_form();
                    return;
                }
                console.faculty().update(&original.id, patch).await
            }
        };

        match result {
            Ok(_) => {
                reset_form();
                mark_changed(data_revision, error);
            }
            Err(e) => report_error(error, "Failed to save faculty member", e),
        }
    };

    rsx! {
        h1 { class: "page-title", "Faculty" }

        div { class: "record-form",
            TextField { label: "First name", value: first_name }
            TextField { label: "Last name", value: last_name }
            TextField { label: "Email", value: email, kind: "email" }
            TextField { label: "Designation", value: designation }
            TextField { label: "Department id", value: department_id }
            button { class: "btn", onclick: save,
                if editing().is_some() { "Save changes" } else { "Add faculty" }
            }
            if editing().is_some() {
                button { class: "btn btn-secondary", onclick: move |_| reset_form(), "Cancel" }
            }
        }

        if faculty.read().is_empty() {
            div { class: "empty-state", "No faculty yet." }
        } else {
            table { class: "record-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Email" }
                        th { "Designation" }
                        th {}
                    }
                }
                tbody {
                    for member in faculty() {
                        {
                            let id = member.id;
                            let name = member.full_name();
                            let role = display_opt(&member.designation);
                            let to_edit = member.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{id}" }
                                    td { "{name}" }
                                    td { "{member.email}" }
                                    td { "{role}" }
                                    td { class: "actions",
                                        button {
                                            class: "btn btn-small btn-secondary",
                                            onclick: move |_| {
                                                first_name.set(to_edit.first_name.clone());
                                                last_name.set(to_edit.last_name.clone());
                                                email.set(to_edit.email.clone());
                                                designation.set(display_opt(&to_edit.designation));
                                                department_id.set(display_opt(&to_edit.department_id));
                                                editing.set(Some(to_edit.clone()));
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-small btn-danger",
                                            onclick: move |_| async move {
                                                let console = console.peek().clone();
                                                match console.faculty().delete(&id).await {
                                                    Ok(()) => mark_changed(data_revision, error),
                                                    Err(e) => report_error(error, "Failed to delete faculty member", e),
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
