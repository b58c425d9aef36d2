use dioxus::prelude::*;

#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "mt-4 p-3 bg-red-100 text-red-700 rounded-lg",
            "{message}"
        }
    }
}

#[component]
pub fn SuccessMessage(message: String) -> Element {
    rsx! {
        div { class: "mt-4 p-3 bg-green-100 text-green-700 rounded-lg",
            "{message}"
        }
    }
}

/// Labelled single-line text input
#[component]
pub fn TextField(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "".to_string())]
    placeholder: String,
) -> Element {
    rsx! {
        div { class: "mb-6",
            label { class: "block text-gray-700 text-sm font-bold mb-2", "{label}" }
            input {
                class: "w-full px-3 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-purple-500",
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |e| oninput.call(e.value()),
            }
        }
    }
}
