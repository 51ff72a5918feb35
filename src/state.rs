use crate::frontend::Frontend;
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};

#[derive(Clone)]
pub struct RosterState {
    frontend: Arc<Frontend>,
}

impl RosterState {
    pub fn new(frontend: Frontend) -> Self {
        Self {
            frontend: Arc::new(frontend),
        }
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white p-8" {
                    (markup)
                }
            }
        }
    }
}

impl Deref for RosterState {
    type Target = Frontend;

    fn deref(&self) -> &Self::Target {
        &self.frontend
    }
}
