//! Account activation flow
//!
//! Token fetch, identity lookup and insert run strictly in sequence with a
//! single attempt each. Every failure keeps its cause for the logs while the
//! screen only ever shows one generic message.

use thiserror::Error;

use crate::api::{ActivationStore, ApiError, IdentityError, IdentityProvider};
use crate::models::{ActivationDraft, NewUserActivation, UserActivation};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const ACTIVATION_FAILED_MESSAGE: &str = "Invalid activation token or company information";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActivationError {
    #[error("Missing company, position or activation token")]
    MissingFields,
    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Activation rejected: {0}")]
    Rejected(ApiError),
}

impl From<ApiError> for ActivationError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => ActivationError::Network(msg),
            other => ActivationError::Rejected(other),
        }
    }
}

impl ActivationError {
    /// Text shown to the user. Remote causes are deliberately indistinguishable.
    pub fn user_message(&self) -> &'static str {
        match self {
            ActivationError::MissingFields => MISSING_FIELDS_MESSAGE,
            _ => ACTIVATION_FAILED_MESSAGE,
        }
    }
}

/// Submit an activation for the signed-in user
pub async fn activate(
    identity: &dyn IdentityProvider,
    store: &dyn ActivationStore,
    draft: &ActivationDraft,
) -> Result<UserActivation, ActivationError> {
    let access_token = identity.access_token().await?;
    let user = identity.current_user().await?;

    let record = NewUserActivation {
        user_id: user.sub,
        company_id: draft.company.id,
        position: draft.position.clone(),
        activation_token: draft.activation_token.clone(),
        email: user.email,
    };

    let row = store.insert(&record, Some(&access_token)).await?;
    tracing::info!(user_id = %row.user_id, company_id = row.company_id, "account activated");
    Ok(row)
}
