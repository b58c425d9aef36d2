use dioxus::prelude::*;

use crate::components::activation::ActivationPage;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Activate {},

    #[route("/home")]
    Home {},

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

// Route handler components
#[component]
fn Activate() -> Element {
    rsx! { ActivationPage {} }
}

#[component]
fn Home() -> Element {
    rsx! {
        div { class: "min-h-screen bg-gray-100 flex justify-center items-center p-6",
            div { class: "bg-white rounded-lg shadow-xl p-8 w-full max-w-md text-center",
                h2 { class: "text-2xl font-bold mb-2 text-gray-800", "Welcome" }
                p { class: "text-gray-600", "Your account is active." }
            }
        }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div { class: "min-h-screen flex flex-col items-center justify-center text-gray-500",
            p { "No page at /{path}" }
            Link { to: Route::Activate {}, class: "mt-4 text-purple-600 hover:text-purple-700", "Go to activation" }
        }
    }
}
