//! Enrollments page: links students to courses, with an optional grade.

use dioxus::prelude::*;
use registrar_core::{Course, Enrollment, EnrollmentDraft, EnrollmentPatch, Resource, Student};

use super::{changed, changed_opt, display_opt, non_empty, parse_required};
use crate::components::TextField;
use crate::context::{mark_changed, report_error, use_console, use_data_revision, use_error_banner};

#[component]
pub fn Enrollments() -> Element {
    let console = use_console();
    let data_revision = use_data_revision();
    let error = use_error_banner();

    let mut enrollments: Signal<Vec<Enrollment>> = use_signal(Vec::new);
    let mut students: Signal<Vec<Student>> = use_signal(Vec::new);
    let mut courses: Signal<Vec<Course>> = use_signal(Vec::new);
    let mut editing: Signal<Option<Enrollment>> = use_signal(|| None);
    let mut student_id = use_signal(String::new);
    let mut course_code = use_signal(String::new);
    let mut grade = use_signal(String::new);

    use_effect(move || {
        let _ = data_revision();
        spawn(async move {
            let console = console.peek().clone();
            match console.enrollments().fetch_all().await {
                Ok(list) => enrollments.set(list),
                Err(e) => report_error(error, "Failed to load enrollments", e),
            }
            match console.students().fetch_all().await {
                Ok(list) => students.set(list),
                Err(e) => report_error(error, "Failed to load students", e),
            }
            match console.courses().fetch_all().await {
                Ok(list) => courses.set(list),
                Err(e) => report_error(error, "Failed to load courses", e),
            }
        });
    });

    let mut reset_form = move || {
        editing.set(None);
        for mut field in [student_id, course_code, grade] {
            field.set(String::new());
        }
    };

    let save = move |_| async move {
        let student = match parse_required::<u64>("Student", &student_id()) {
            Ok(v) => v,
            Err(e) => return report_error(error, "Invalid enrollment", e),
        };
        let code = course_code().trim().to_uppercase();

        let console = console.peek().clone();
        let result = match editing() {
            None => {
                console
                    .enrollments()
                    .create(EnrollmentDraft {
                        student_id: student,
                        course_code: code,
                        grade: non_empty(&grade()),
                    })
                    .await
            }
            Some(original) => {
                let patch = EnrollmentPatch {
                    student_id: changed(student, &original.student_id),
                    course_code: changed(code, &original.course_code),
                    grade: changed_opt(non_empty(&grade()), &original.grade),
                };
                if Enrollment::patch_columns(&patch).is_empty() {
                    reset_form();
                    return;
                }
                console.enrollments().update(&original.id, patch).await
            }
        };

        match result {
            Ok(_) => {
                reset_form();
                mark_changed(data_revision, error);
            }
            Err(e) => report_error(error, "Failed to save enrollment", e),
        }
    };

    let student_name = move |id: u64| -> String {
        students
            .read()
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.full_name())
            .unwrap_or_else(|| format!("#{}", id))
    };
    let course_name = move |code: &str| -> String {
        courses
            .read()
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| code.to_string())
    };

    rsx! {
        h1 { class: "page-title", "Enrollments" }

        div { class: "record-form",
            TextField { label: "Student id", value: student_id }
            TextField { label: "Course code", value: course_code, placeholder: "CS101" }
            TextField { label: "Grade", value: grade }
            button { class: "btn", onclick: save,
                if editing().is_some() { "Save changes" } else { "Enroll" }
            }
            if editing().is_some() {
                button { class: "btn btn-secondary", onclick: move |_| reset_form(), "Cancel" }
            }
        }

        if enrollments.read().is_empty() {
            div { class: "empty-state", "No enrollments yet." }
        } else {
            table { class: "record-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Student" }
                        th { "Course" }
                        th { "Grade" }
                        th { "Enrolled" }
                        th {}
                    }
                }
                tbody {
                    for enrollment in enrollments() {
                        {
                            let id = enrollment.id;
                            let who = student_name(enrollment.student_id);
                            let what = course_name(&enrollment.course_code);
                            let graded = display_opt(&enrollment.grade);
                            let since = enrollment.enrolled_at.format("%Y-%m-%d").to_string();
                            let to_edit = enrollment.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{id}" }
                                    td { "{who}" }
                                    td { "{what}" }
                                    td { "{graded}" }
                                    td { "{since}" }
                                    td { class: "actions",
                                        button {
                                            class: "btn btn-small btn-secondary",
                                            onclick: move |_| {
                                                student_id.set(to_edit.student_id.to_string());
                                                course_code.set(to_edit.course_code.clone());
                                                grade.set(display_opt(&to_edit.grade));
                                                editing.set(Some(to_edit.clone()));
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-small btn-danger",
                                            onclick: move |_| async move {
                                                let console = console.peek().clone();
                                                match console.enrollments().delete(&id).await {
                                                    Ok(()) => mark_changed(data_revision, error),
                                                    Err(e) => report_error(error, "Failed to delete enrollment", e),
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
