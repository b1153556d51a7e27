//! `/api/users` client helper.
//!
//! Performs the network IO only; callers map the result into compute updates.

use crate::error::FetchError;
use crate::http::Client;
use crate::records::RawRecord;

/// GET `{api_url}/users`
///
/// Any non-2xx status is an error, and so is a body that is not a JSON array of
/// well-formed records.
pub async fn list_users(users_url: &str) -> Result<Vec<RawRecord>, FetchError> {
    let response = Client::get(users_url)
        .header("accept", "application/json")
        .send()
        .await?;

    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }

    Ok(response.json::<Vec<RawRecord>>()?)
}
