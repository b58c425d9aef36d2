use async_trait::async_trait;

use crate::api::{ApiError, RestClient};
use crate::models::Company;

/// Maximum number of rows a company search returns
pub const SEARCH_LIMIT: usize = 5;

/// Queries shorter than this never reach the backend
pub const MIN_QUERY_CHARS: usize = 2;

/// Read side of the `companies` collection
#[async_trait(?Send)]
pub trait CompanyDirectory {
    /// Case-insensitive prefix match on `name`, at most [`SEARCH_LIMIT`] rows
    async fn search(&self, prefix: &str) -> Result<Vec<Company>, ApiError>;
}

/// PostgREST query for a prefix search
pub fn search_params(prefix: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", "id,name".to_string()),
        ("name", format!("ilike.{}*", prefix)),
        ("limit", SEARCH_LIMIT.to_string()),
    ]
}

#[async_trait(?Send)]
impl CompanyDirectory for RestClient {
    async fn search(&self, prefix: &str) -> Result<Vec<Company>, ApiError> {
        tracing::debug!(prefix, "searching companies");
        self.select("companies", &search_params(prefix)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params() {
        let params = search_params("Ac");
        assert_eq!(
            params,
            vec![
                ("select", "id,name".to_string()),
                ("name", "ilike.Ac*".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_keep_spaces() {
        let params = search_params("Acme La");
        assert_eq!(params[1].1, "ilike.Acme La*");
    }
}
