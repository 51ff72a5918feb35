//! Everything the browser sees. Each operation talks to the students API, updates the shared
//! list panel where needed, and hands back a fragment for htmx to swap in.

use crate::{
    api::StudentsApi,
    config::date_locale::DateLocaleConfig,
    data::student::{FormStudent, Student},
};
use delete::Confirmation;
use list::{ListState, StudentsPanel};
use maud::{Markup, html};
use notice::{ErrorReporter, Notice};
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod notice;

pub struct Frontend {
    api: Arc<dyn StudentsApi>,
    reporter: Arc<dyn ErrorReporter>,
    dates: Arc<DateLocaleConfig>,
    panel: Mutex<StudentsPanel>,
}

impl Frontend {
    pub fn new(
        api: Arc<dyn StudentsApi>,
        reporter: Arc<dyn ErrorReporter>,
        dates: Arc<DateLocaleConfig>,
    ) -> Self {
        Self {
            api,
            reporter,
            dates,
            panel: Mutex::new(StudentsPanel::default()),
        }
    }

    /// What the page holds before the first fetch lands. htmx swaps it for [`Self::load_list`].
    pub fn loading_panel(&self) -> Markup {
        html! {
            div id="students_panel" hx-get="/internal/students" hx-trigger="load" hx-swap="outerHTML" class="flex flex-col space-y-4" {
                (ListState::Loading.render(&self.dates))
            }
        }
    }

    pub async fn load_list(&self) -> Markup {
        let mut panel = self.panel.lock().await;
        let notices: Vec<Notice> = panel
            .refresh(self.api.as_ref(), self.reporter.as_ref())
            .await
            .into_iter()
            .collect();
        panel.render(&self.dates, &notices)
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<Student, Notice> {
        self.api
            .get(id)
            .await
            .map_err(|e| self.reporter.report("Unable to load student", &e))
    }

    pub async fn view(&self, id: &str) -> Markup {
        match self.fetch_detail(id).await {
            Ok(student) => detail::render_student_detail(&student, &self.dates),
            Err(notice) => html! { (notice) },
        }
    }

    pub async fn delete(&self, id: &str, confirmation: Confirmation) -> Markup {
        let mut panel = self.panel.lock().await;
        let notices = delete::delete_then_reload(
            &mut panel,
            self.api.as_ref(),
            self.reporter.as_ref(),
            id,
            confirmation,
        )
        .await;
        panel.render(&self.dates, &notices)
    }

    pub fn new_student_form(&self) -> Markup {
        create::render_new_student_form()
    }

    pub async fn create(&self, form: FormStudent) -> Markup {
        let mut panel = self.panel.lock().await;
        let notices = create::create_then_reload(
            &mut panel,
            self.api.as_ref(),
            self.reporter.as_ref(),
            form,
        )
        .await;
        panel.render(&self.dates, &notices)
    }

    #[cfg(test)]
    pub async fn list_state(&self) -> ListState {
        self.panel.lock().await.state().clone()
    }
}
