use gloo_storage::{LocalStorage, Storage};

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// LocalStorage key holding the service base URL override.
const API_BASE_KEY: &str = "api_base_url";

/// Base URL of the prediction service. Operators point the UI at another
/// instance by setting the `api_base_url` LocalStorage key.
pub fn api_base() -> String {
    let base: String =
        LocalStorage::get(API_BASE_KEY).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    base.trim_end_matches('/').to_string()
}
