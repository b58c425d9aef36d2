use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insert payload for the `user_activations` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserActivation {
    pub user_id: String,
    pub company_id: i64,
    pub position: String,
    pub activation_token: String,
    pub email: Option<String>,
}

/// Row returned by the backend after a successful insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivation {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: String,
    pub company_id: i64,
    pub position: String,
    pub activation_token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated form contents, ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationDraft {
    pub company: super::Company,
    pub position: String,
    pub activation_token: String,
}
