use crate::state::RosterState;
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-4" {
            h1 class="text-2xl font-semibold mb-2 text-center" {
                "Students"
            }

            div class="flex flex-row space-x-4 justify-center" {
                button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/students" hx-target="#students_panel" hx-swap="outerHTML" {
                    "Refresh"
                }
                button class="bg-green-600 hover:bg-green-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/new_form" hx-target="#in_focus" {
                    "Add new Student"
                }
            }

            div class="container flex flex-col lg:flex-row justify-center lg:space-x-4" {
                (state.loading_panel())
                div id="in_focus" {}
            }
        }
    })
}
