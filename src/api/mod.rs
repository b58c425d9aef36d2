pub mod activation;
pub mod activations;
pub mod client;
pub mod companies;
pub mod identity;

pub use activations::*;
pub use client::*;
pub use companies::*;
pub use identity::*;

use std::rc::Rc;

use crate::config::AppConfig;

/// External services used by the activation screen, shared through context
#[derive(Clone)]
pub struct Services {
    pub companies: Rc<dyn CompanyDirectory>,
    pub activations: Rc<dyn ActivationStore>,
    pub identity: Rc<dyn IdentityProvider>,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Self {
        let rest = RestClient::new(&config.rest_url(), &config.supabase_key);

        let identity = Auth0Client::new(
            &config.auth0_base_url(),
            &config.auth0_client_id,
            config.auth0_audience.clone(),
        )
        .with_refresh_token(stored_refresh_token(config));

        Services {
            companies: Rc::new(rest.clone()),
            activations: Rc::new(SupabaseActivations::new(rest, config.forward_auth)),
            identity: Rc::new(identity),
        }
    }
}

/// Refresh token left in local storage by the host page's login flow
#[cfg(target_arch = "wasm32")]
fn stored_refresh_token(config: &AppConfig) -> Option<String> {
    let key = format!("auth0.{}.refresh_token", config.auth0_client_id);
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(&key).ok().flatten())
        .or_else(|| config.auth0_refresh_token.clone())
}

#[cfg(not(target_arch = "wasm32"))]
fn stored_refresh_token(config: &AppConfig) -> Option<String> {
    config.auth0_refresh_token.clone()
}
