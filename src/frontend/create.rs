use crate::{
    api::StudentsApi,
    data::student::FormStudent,
    frontend::{
        list::StudentsPanel,
        notice::{ErrorReporter, Notice},
    },
    maud_conveniences::{form_submit_button, simple_form_element, title},
};
use maud::{Markup, html};

pub fn render_new_student_form() -> Markup {
    html! {
        (title("Add New Student"))

        form hx-put="/internal/students" hx-trigger="submit" hx-target="#students_panel" hx-swap="outerHTML" class="p-4" {
            (simple_form_element("first_name", "First Name", true, None))
            (simple_form_element("last_name", "Last Name", true, None))
            (simple_form_element("dob", "Date of Birth", true, Some("date")))
            (simple_form_element("class", "Class", true, None))
            (simple_form_element("session", "Session", true, None))

            (form_submit_button(Some("Add Student")))
        }
    }
}

/// Validates locally first; an incomplete form never reaches the API.
pub async fn create_then_reload(
    panel: &mut StudentsPanel,
    api: &dyn StudentsApi,
    reporter: &dyn ErrorReporter,
    form: FormStudent,
) -> Vec<Notice> {
    let new_student = match form.validate() {
        Ok(new_student) => new_student,
        Err(e) => {
            warn!(?e, "Rejected add-student form");
            return vec![Notice::Failure(e.to_string())];
        }
    };

    let created = match api.create(&new_student).await {
        Ok(created) => created,
        Err(e) => return vec![reporter.report("Unable to add student", &e)],
    };

    info!(id = created.id, "Added student");
    let mut notices = vec![Notice::Success(format!("Added {}", created.full_name()))];
    notices.extend(panel.refresh(api, reporter).await);
    notices
}
