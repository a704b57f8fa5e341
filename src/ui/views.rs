use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Deserialize;

use crate::students::repo::Student;

/// The three page roles. Selected by route at startup, never by probing
/// which elements happen to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    List,
    Create,
    Edit,
}

/// Raw form field values as typed by the user. `age` stays a string so an
/// invalid submission can be re-rendered exactly as entered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: String,
}

impl From<&Student> for FormValues {
    fn from(s: &Student) -> Self {
        Self {
            name: s.name.clone().unwrap_or_default(),
            email: s.email.clone().unwrap_or_default(),
            age: s.age.map(|a| a.to_string()).unwrap_or_default(),
            course: s.course.clone().unwrap_or_default(),
            gender: s.gender.clone().unwrap_or_default(),
            address: s.address.clone().unwrap_or_default(),
        }
    }
}

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 56rem; margin: 2rem auto; } \
table { border-collapse: collapse; width: 100%; } \
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; } \
label { display: block; margin: 0.6rem 0; } \
input { margin-left: 0.4rem; } \
.alert { background: #fdd; border: 1px solid #c00; padding: 0.6rem; margin: 0.6rem 0; } \
nav a.active { font-weight: bold; }";

pub fn page(current: Page, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    a href="/" class=(if current == Page::Create { "active" } else { "" }) {
                        "Add Student"
                    }
                    " | "
                    a href="/students" class=(if current == Page::List { "active" } else { "" }) {
                        "All Students"
                    }
                }
                h1 { (title) }
                (body)
            }
        }
    }
}

pub fn alert(message: &str) -> Markup {
    html! {
        div class="alert" role="alert" { (message) }
    }
}

/// One row per record. All field text goes through maud's escaping, so
/// markup-significant characters in stored data render inert.
pub fn students_table(students: &[Student]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Name" }
                    th { "Email" }
                    th { "Age" }
                    th { "Course" }
                    th { "Gender" }
                    th { "Address" }
                    th { "Actions" }
                }
            }
            tbody {
                @for s in students {
                    tr {
                        td { (s.name.as_deref().unwrap_or("")) }
                        td { (s.email.as_deref().unwrap_or("")) }
                        td { @if let Some(age) = s.age { (age) } }
                        td { (s.course.as_deref().unwrap_or("")) }
                        td { (s.gender.as_deref().unwrap_or("")) }
                        td { (s.address.as_deref().unwrap_or("")) }
                        td {
                            a href={ "/edit?id=" (s.id) } { "Edit" }
                            " "
                            form method="post" action={ "/delete?id=" (s.id) }
                                style="display:inline"
                                onsubmit="return confirm('Delete this student?');" {
                                button type="submit" { "Delete" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The create/edit form. The submit button disables itself on submit so a
/// rapid double-click cannot fire two requests.
pub fn student_form(
    action: &str,
    submit_label: &str,
    values: &FormValues,
    error: Option<&str>,
) -> Markup {
    html! {
        @if let Some(message) = error {
            (alert(message))
        }
        form method="post" action=(action)
            onsubmit="this.querySelector('button[type=submit]').disabled = true;" {
            label { "Name" input type="text" name="name" value=(values.name) required; }
            label { "Email" input type="email" name="email" value=(values.email) required; }
            label { "Age" input type="number" name="age" min="0" value=(values.age) required; }
            label { "Course" input type="text" name="course" value=(values.course); }
            label { "Gender" input type="text" name="gender" value=(values.gender); }
            label { "Address" input type="text" name="address" value=(values.address); }
            button type="submit" { (submit_label) }
        }
    }
}
