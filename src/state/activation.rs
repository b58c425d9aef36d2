//! View state for the activation screen
//!
//! Every transition is a plain method so the screen's behavior can be
//! exercised without a renderer. The component only forwards events here
//! and runs the I/O these methods ask for.

use std::time::Duration;

use crate::api::activation::ActivationError;
use crate::api::{ApiError, MIN_QUERY_CHARS, SEARCH_LIMIT};
use crate::models::{ActivationDraft, Company, UserActivation};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search companies";
pub const ACTIVATED_MESSAGE: &str = "Account activated successfully!";

/// Pause between a successful activation and the move to the home route
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// A search the screen asked for. Responses are matched back by `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Company>,
    pub show_dropdown: bool,
    latest_seq: u64,
}

impl SearchState {
    pub fn dropdown_visible(&self) -> bool {
        self.show_dropdown && !self.results.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivationForm {
    pub position: String,
    pub activation_token: String,
    pub selected: Option<Company>,
}

/// Message under the form; error and success never coexist
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Feedback {
    #[default]
    None,
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionState {
    pub loading: bool,
    pub feedback: Feedback,
}

impl SubmissionState {
    pub fn error(&self) -> Option<&str> {
        match &self.feedback {
            Feedback::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.feedback {
            Feedback::Success(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivationView {
    pub search: SearchState,
    pub form: ActivationForm,
    pub submission: SubmissionState,
}

impl ActivationView {
    /// Record a keystroke in the company field.
    /// Returns the search to run, or `None` when the text is too short.
    pub fn set_query(&mut self, text: String) -> Option<SearchTicket> {
        if self
            .form
            .selected
            .as_ref()
            .is_some_and(|company| company.name != text)
        {
            self.form.selected = None;
        }

        self.search.query = text;
        // Any newer keystroke supersedes searches still in flight
        self.search.latest_seq += 1;

        if self.search.query.chars().count() < MIN_QUERY_CHARS {
            self.search.results.clear();
            self.search.show_dropdown = false;
            return None;
        }

        Some(SearchTicket {
            seq: self.search.latest_seq,
            query: self.search.query.clone(),
        })
    }

    /// Apply a search response. Stale responses are dropped; returns whether
    /// this one was applied.
    pub fn apply_search(&mut self, ticket: &SearchTicket, result: Result<Vec<Company>, ApiError>) -> bool {
        if ticket.seq != self.search.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.search.latest_seq,
                "discarding stale company search"
            );
            return false;
        }

        match result {
            Ok(mut companies) => {
                companies.truncate(SEARCH_LIMIT);
                self.search.results = companies;
                self.search.show_dropdown = true;
            }
            Err(e) => {
                // Previous results stay on screen
                tracing::error!(query = %ticket.query, error = %e, "Error searching companies");
                self.submission.feedback = Feedback::Error(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Pick a company from the current result list by id
    pub fn select_company(&mut self, id: i64) -> Option<&Company> {
        let company = self.search.results.iter().find(|c| c.id == id)?.clone();
        // A search still in flight must not reopen the dropdown
        self.search.latest_seq += 1;
        self.search.query = company.name.clone();
        self.search.show_dropdown = false;
        self.form.selected = Some(company);
        self.form.selected.as_ref()
    }

    pub fn set_position(&mut self, position: String) {
        self.form.position = position;
    }

    pub fn set_activation_token(&mut self, token: String) {
        self.form.activation_token = token;
    }

    /// Gate a press of the activate button.
    ///
    /// Returns the draft to submit and enters the loading state, or `None`
    /// when a submission is already running or a field is missing.
    pub fn begin_submit(&mut self) -> Option<ActivationDraft> {
        if self.submission.loading {
            return None;
        }

        let company = match &self.form.selected {
            Some(company) if !self.form.position.is_empty() && !self.form.activation_token.is_empty() => {
                company.clone()
            }
            _ => {
                let err = ActivationError::MissingFields;
                self.submission.feedback = Feedback::Error(err.user_message().to_string());
                return None;
            }
        };

        self.submission.loading = true;
        self.submission.feedback = Feedback::None;

        Some(ActivationDraft {
            company,
            position: self.form.position.clone(),
            activation_token: self.form.activation_token.clone(),
        })
    }

    /// Leave the loading state with the outcome of a submission.
    /// Returns how long to wait before navigating home; `None` means stay.
    pub fn finish_submit(&mut self, result: &Result<UserActivation, ActivationError>) -> Option<Duration> {
        self.submission.loading = false;
        match result {
            Ok(_) => {
                self.submission.feedback = Feedback::Success(ACTIVATED_MESSAGE.to_string());
                Some(REDIRECT_DELAY)
            }
            Err(e) => {
                tracing::error!(error = %e, "Activation error");
                self.submission.feedback = Feedback::Error(e.user_message().to_string());
                None
            }
        }
    }
}
