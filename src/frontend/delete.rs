use crate::{
    api::StudentsApi,
    frontend::{
        list::StudentsPanel,
        notice::{ErrorReporter, Notice},
    },
};

/// Whether the user agreed to a destructive action. Nothing is sent without `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Deletes `id` and reloads the panel from the API. On failure the panel is left alone.
pub async fn delete_then_reload(
    panel: &mut StudentsPanel,
    api: &dyn StudentsApi,
    reporter: &dyn ErrorReporter,
    id: &str,
    confirmation: Confirmation,
) -> Vec<Notice> {
    if confirmation == Confirmation::Declined {
        debug!(id, "Delete not confirmed, nothing sent");
        return Vec::new();
    }

    if let Err(e) = api.delete(id).await {
        return vec![reporter.report("Unable to delete student", &e)];
    }

    info!(id, "Deleted student");
    let mut notices = vec![Notice::Success("Student deleted successfully".into())];
    notices.extend(panel.refresh(api, reporter).await);
    notices
}
