use crate::{
    api::StudentsApi,
    config::date_locale::{DateFormatter, DateLocaleConfig},
    data::student::Student,
    frontend::notice::{ErrorReporter, Notice},
    maud_conveniences::render_table,
};
use maud::{Markup, html};
use serde_json::json;

pub const COLUMNS: [&str; 7] = [
    "ID",
    "First Name",
    "Last Name",
    "Date of Birth",
    "Class",
    "Session",
    "Actions",
];

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this student?";

/// One table row, still as plain text. Escaping happens when it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub class: String,
    pub session: String,
}

impl StudentRow {
    pub fn new(student: &Student, dates: &DateFormatter) -> Self {
        Self {
            id: student.id.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            dob: dates.format(&student.dob),
            class: student.class.clone(),
            session: student.session.clone(),
        }
    }
}

pub fn student_rows(students: &[Student], dates: &DateLocaleConfig) -> Vec<StudentRow> {
    let formatter = dates.formatter();
    students
        .iter()
        .map(|student| StudentRow::new(student, &formatter))
        .collect()
}

pub fn id_vals(id: &str) -> String {
    json!({ "id": id }).to_string()
}

pub fn delete_vals(id: &str) -> String {
    json!({ "id": id, "confirmed": true }).to_string()
}

pub fn view_button(id: &str) -> Markup {
    html! {
        button class="bg-sky-600 hover:bg-sky-800 font-bold py-1 px-3 rounded text-sm" hx-get="/internal/student" hx-vals=(id_vals(id)) hx-target="#in_focus" {
            "View"
        }
    }
}

pub fn delete_button(id: &str) -> Markup {
    html! {
        button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded text-sm" hx-delete="/internal/student" hx-vals=(delete_vals(id)) hx-confirm=(DELETE_CONFIRMATION) hx-target="#students_panel" hx-swap="outerHTML" {
            "Delete"
        }
    }
}

pub fn render_rows(rows: Vec<StudentRow>) -> Markup {
    if rows.is_empty() {
        return html! {
            p class="italic text-gray-400" {"No students found."}
        };
    }

    let items = rows
        .into_iter()
        .map(|row| {
            let actions = html! {
                div class="flex flex-row space-x-2" {
                    (view_button(&row.id))
                    (delete_button(&row.id))
                }
            };
            [
                html! {(row.id)},
                html! {(row.first_name)},
                html! {(row.last_name)},
                html! {(row.dob)},
                html! {(row.class)},
                html! {(row.session)},
                actions,
            ]
        })
        .collect();

    render_table(COLUMNS, items)
}

pub fn render_students(students: &[Student], dates: &DateLocaleConfig) -> Markup {
    render_rows(student_rows(students, dates))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Displayed(Vec<Student>),
    Error(String),
}

impl ListState {
    pub fn render(&self, dates: &DateLocaleConfig) -> Markup {
        match self {
            Self::Idle => html! {},
            Self::Loading => html! {
                p class="italic text-gray-400" {"Loading students..."}
            },
            Self::Displayed(students) => render_students(students, dates),
            Self::Error(message) => html! {
                p class="text-red-400" {"Unable to show students: " (message)}
            },
        }
    }
}

/// The list as the user last saw it. A refresh moves it to `Displayed` or `Error` once the API
/// has answered, except that a failed refresh of an already displayed list keeps that list on
/// screen. Nothing changes until then, so a refresh dropped mid-flight leaves the panel as it was.
/// `Loading` is only ever shown by the page's initial placeholder.
#[derive(Debug, Default)]
pub struct StudentsPanel {
    state: ListState,
}

impl StudentsPanel {
    #[cfg(test)]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    pub async fn refresh(
        &mut self,
        api: &dyn StudentsApi,
        reporter: &dyn ErrorReporter,
    ) -> Option<Notice> {
        match api.list().await {
            Ok(students) => {
                debug!(count = students.len(), "Loaded students");
                self.state = ListState::Displayed(students);
                None
            }
            Err(e) => {
                let notice = reporter.report("Unable to load students", &e);
                if !matches!(self.state, ListState::Displayed(_)) {
                    self.state = ListState::Error(notice.message().to_string());
                }
                Some(notice)
            }
        }
    }

    pub fn render(&self, dates: &DateLocaleConfig, notices: &[Notice]) -> Markup {
        html! {
            div id="students_panel" class="flex flex-col space-y-4" {
                @for notice in notices {
                    (notice)
                }
                (self.state.render(dates))
            }
        }
    }
}
