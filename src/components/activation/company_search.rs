use dioxus::prelude::*;

use crate::models::Company;

/// Company name input with its suggestion dropdown
#[component]
pub fn CompanySearch(
    query: String,
    results: Vec<Company>,
    dropdown_visible: bool,
    on_query: EventHandler<String>,
    on_select: EventHandler<i64>,
) -> Element {
    rsx! {
        div { class: "mb-6 relative",
            label { class: "block text-gray-700 text-sm font-bold mb-2", "Company" }
            input {
                class: "w-full px-3 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-purple-500",
                r#type: "text",
                placeholder: "Start typing company name...",
                value: "{query}",
                oninput: move |e| on_query.call(e.value()),
            }

            if dropdown_visible {
                div { class: "absolute z-50 w-full mt-1 bg-white border rounded-lg shadow-lg max-h-48 overflow-y-auto",
                    for Company { id, name } in results.iter().cloned() {
                        div {
                            key: "{id}",
                            class: "px-4 py-2 hover:bg-gray-100 cursor-pointer",
                            onclick: move |_| on_select.call(id),
                            "{name}"
                        }
                    }
                }
            }
        }
    }
}
