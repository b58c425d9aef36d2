//! Company Account Activation - Dioxus Application
//!
//! A single screen where a signed-in user picks their company, enters
//! their position and an activation token, and activates their account.
//!
//! Companies and activations live in Supabase; identity comes from Auth0.

mod api;
mod components;
mod config;
mod models;
mod routes;
mod state;

use dioxus::prelude::*;

use api::Services;
use config::AppConfig;
use routes::Route;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("company_activation=info")),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration from environment")?;
    tracing::info!(
        supabase = %config.supabase_url,
        auth0 = %config.auth0_domain,
        "Starting company activation"
    );

    run_app(config);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    match AppConfig::from_build_env() {
        Ok(config) => run_app(config),
        Err(e) => {
            // Launch anyway so the page can say what is missing
            tracing::error!("Invalid build configuration: {}", e);
            dioxus::launch(App);
        }
    }
}

fn run_app(config: AppConfig) {
    config::init_config(config);

    // Launch the Dioxus app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global styles
        document::Script { src: "https://cdn.tailwindcss.com" }
        style { {include_str!("../assets/styles.css")} }

        if let Some(config) = config::app_config() {
            ConfiguredApp { config: config.clone() }
        } else {
            div { class: "min-h-screen flex items-center justify-center bg-gray-100",
                div { class: "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded",
                    "Backend configuration is missing. Set SUPABASE_URL, SUPABASE_KEY, AUTH0_DOMAIN and AUTH0_CLIENT_ID."
                }
            }
        }
    }
}

#[component]
fn ConfiguredApp(config: AppConfig) -> Element {
    use_context_provider(|| Services::from_config(&config));

    rsx! {
        Router::<Route> {}
    }
}
