use crate::{
    config::date_locale::DateLocaleConfig,
    data::student::Student,
    frontend::list::delete_button,
    maud_conveniences::title,
};
use maud::{Markup, html};

fn field(label: &'static str, value: &str) -> Markup {
    html! {
        p class="text-gray-200 font-semibold" {
            (label) ": "
            span class="font-medium" {(value)}
        }
    }
}

pub fn render_student_detail(student: &Student, dates: &DateLocaleConfig) -> Markup {
    let dates = dates.formatter();

    html! {
        div class="container mx-auto" {
            (title(student.full_name()))

            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md mx-auto" {
                div class="p-4" {
                    (field("ID", &student.id))
                    (field("Name", &student.full_name()))
                    (field("DOB", &dates.format(&student.dob)))
                    (field("Class", &student.class))
                    (field("Session", &student.session))
                    @if let Some(created) = &student.created_date {
                        (field("Registered", &dates.format(created)))
                    }

                    br;
                    (delete_button(&student.id))
                }
            }
        }
    }
}
