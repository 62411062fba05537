use dioxus::prelude::*;
use registrar_core::{Department, DepartmentDraft, DepartmentPatch, Resource};

use super::{changed, changed_opt, display_opt, non_empty};
use crate::components::TextField;
use crate::context::{mark_changed, report_error, use_console, use_data_revision, use_error_banner};

#[component]
pub fn Departments() -> Element {
    let console = use_console();
    let data_revision = use_data_revision();
    let error = use_error_banner();

    let mut departments: Signal<Vec<Department>> = use_signal(Vec::new);
    let mut editing: Signal<Option<Department>> = use_signal(|| None);
    let mut name = use_signal(String::new);
    let mut head = use_signal(String::new);

    use_effect(move || {
        let _ = data_revision();
        spawn(async move {
            let console = console.peek().clone();
            match console.departments().fetch_all().await {
                Ok(list) => departments.set(list),
                Err(e) => report_error(error, "Failed to load departments", e),
            }
        });
    });

    let mut reset_form = move || {
        editing.set(None);
        name.set(String::new());
        head.set(String::new());
    };

    let save = move |_| async move {
        let console = console.peek().clone();
        let result = match editing() {
            None => {
                console
                    .departments()
                    .create(DepartmentDraft {
                        name: name().trim().to_string(),
                        head: non_empty(&head()),
                    })
                    .await
            }
            Some(original) => {
                let patch = DepartmentPatch {
                    name: changed(name().trim().to_string(), &original.name),
                    head: changed_opt(non_empty(&head()), &original.head),
                };
                if Department::patch_columns(&patch).is_empty() {
                    reset_form();
                    return;
                }
                console.departments().update(&original.id, patch).await
            }
        };

        match result {
            Ok(_) => {
                reset_form();
                mark_changed(data_revision, error);
            }
            Err(e) => report_error(error, "Failed to save department", e),
        }
    };

    rsx! {
        h1 { class: "page-title", "Departments" }

        div { class: "record-form",
            TextField { label: "Name", value: name }
            TextField { label: "Head", value: head }
            button { class: "btn", onclick: save,
                if editing().is_some() { "Save changes" } else { "Add department" }
            }
            if editing().is_some() {
                button { class: "btn btn-secondary", onclick: move |_| reset_form(), "Cancel" }
            }
        }

        if departments.read().is_empty() {
            div { class: "empty-state", "No departments yet." }
        } else {
            table { class: "record-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Head" }
                        th {}
                    }
                }
                tbody {
                    for dept in departments() {
                        {
                            let id = dept.id;
                            let head_name = display_opt(&dept.head);
                            let to_edit = dept.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{id}" }
                                    td { "{dept.name}" }
                                    td { "{head_name}" }
                                    td { class: "actions",
                                        button {
                                            class: "btn btn-small btn-secondary",
                                            onclick: move |_| {
                                                name.set(to_edit.name.clone());
                                                head.set(display_opt(&to_edit.head));
                                                editing.set(Some(to_edit.clone()));
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-small btn-danger",
                                            onclick: move |_| async move {
                                                let console = console.peek().clone();
                                                match console.departments().delete(&id).await {
                                                    Ok(()) => mark_changed(data_revision, error),
                                                    Err(e) => report_error(error, "Failed to delete department", e),
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
