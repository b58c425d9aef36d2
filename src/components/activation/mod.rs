//! Account activation screen

mod company_search;

pub use company_search::CompanySearch;

use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::api::{self, Services};
use crate::components::common::{ErrorMessage, SuccessMessage, TextField};
use crate::routes::Route;
use crate::state::{ActivationView, PendingTask};

async fn sleep(delay: Duration) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(delay.as_millis() as u32).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(delay).await;
    }
}

#[component]
pub fn ActivationPage() -> Element {
    let services = use_context::<Services>();
    let mut view = use_signal(ActivationView::default);
    let navigator = use_navigator();

    // Submission (and its redirect) must not outlive the screen
    let pending = use_hook(|| Rc::new(RefCell::new(PendingTask::default())));
    {
        let pending = pending.clone();
        use_drop(move || pending.borrow_mut().cancel());
    }

    let on_query = {
        let companies = services.companies.clone();
        move |text: String| {
            let Some(ticket) = view.write().set_query(text) else {
                return;
            };
            let companies = companies.clone();
            spawn(async move {
                let result = companies.search(&ticket.query).await;
                view.write().apply_search(&ticket, result);
            });
        }
    };

    let on_select = move |company_id: i64| {
        view.write().select_company(company_id);
    };

    let on_activate = {
        let services = services.clone();
        let pending = pending.clone();
        move |_| {
            let Some(draft) = view.write().begin_submit() else {
                return;
            };
            let services = services.clone();
            let task = spawn(async move {
                let result = api::activation::activate(
                    services.identity.as_ref(),
                    services.activations.as_ref(),
                    &draft,
                )
                .await;
                let redirect = view.write().finish_submit(&result);

                if let Some(delay) = redirect {
                    sleep(delay).await;
                    navigator.push(Route::Home {});
                }
            });
            pending.borrow_mut().track(move || task.cancel());
        }
    };

    let state = view.read();
    let is_loading = state.submission.loading;

    rsx! {
        div { class: "min-h-screen bg-gray-100 flex justify-center items-center p-6",
            div { class: "bg-white rounded-lg shadow-xl p-8 w-full max-w-md",
                h2 { class: "text-2xl font-bold mb-6 text-gray-800", "Account Activation" }

                CompanySearch {
                    query: state.search.query.clone(),
                    results: state.search.results.clone(),
                    dropdown_visible: state.search.dropdown_visible(),
                    on_query: on_query,
                    on_select: on_select,
                }

                TextField {
                    label: "Position",
                    value: state.form.position.clone(),
                    placeholder: "Your position at the company",
                    oninput: move |value: String| view.write().set_position(value),
                }

                TextField {
                    label: "Activation Token",
                    value: state.form.activation_token.clone(),
                    placeholder: "Enter your activation token",
                    oninput: move |value: String| view.write().set_activation_token(value),
                }

                button {
                    class: "w-full bg-purple-600 text-white py-2 px-4 rounded-lg hover:bg-purple-700 transition duration-200 disabled:opacity-50",
                    disabled: is_loading,
                    onclick: on_activate,
                    if is_loading { "Activating..." } else { "Activate Account" }
                }

                if let Some(message) = state.submission.error() {
                    ErrorMessage { message: message.to_string() }
                }
                if let Some(message) = state.submission.success() {
                    SuccessMessage { message: message.to_string() }
                }
            }
        }
    }
}
