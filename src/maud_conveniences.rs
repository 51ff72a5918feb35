use maud::{Markup, Render, html};

pub fn render_table<const N: usize>(titles: [&'static str; N], items: Vec<[Markup; N]>) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody {
                    @for row in items {
                        tr {
                            @for col in row {
                                td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

/// Fade container. Hidden content stays in the DOM so a later swap can fade it back in.
pub fn toggle_element(markup: Markup, show: bool) -> Markup {
    let class = if show {
        "transition-opacity duration-300 opacity-100"
    } else {
        "transition-opacity duration-300 opacity-0 hidden"
    };

    html! {
        div class=(class) {
            (markup)
        }
    }
}

pub fn form_element(id: &'static str, label: &'static str, input: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (input)
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    required: bool,
    input_type: Option<&'static str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input type=(input_type.unwrap_or("text")) id=(id) name=(id) required[required]
                class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        },
    )
}

pub fn form_submit_button(text: Option<&'static str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}
