use async_trait::async_trait;

use crate::api::{ApiError, RestClient};
use crate::models::{NewUserActivation, UserActivation};

/// Write side of the `user_activations` collection
#[async_trait(?Send)]
pub trait ActivationStore {
    /// Insert one activation record and return the stored row.
    /// `access_token` is the user's bearer token when the backend accepts it.
    async fn insert(
        &self,
        record: &NewUserActivation,
        access_token: Option<&str>,
    ) -> Result<UserActivation, ApiError>;
}

/// Supabase-backed store
#[derive(Clone)]
pub struct SupabaseActivations {
    client: RestClient,
    forward_auth: bool,
}

impl SupabaseActivations {
    pub fn new(client: RestClient, forward_auth: bool) -> Self {
        Self { client, forward_auth }
    }
}

#[async_trait(?Send)]
impl ActivationStore for SupabaseActivations {
    async fn insert(
        &self,
        record: &NewUserActivation,
        access_token: Option<&str>,
    ) -> Result<UserActivation, ApiError> {
        let bearer = if self.forward_auth { access_token } else { None };
        self.client
            .insert_single("user_activations", &[record], bearer)
            .await
    }
}
