mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::dataset::RetrievalError;

/// Issues a GET for `url` and returns the response body.
///
/// A non-success status is an error, so a 404 page never reaches the parser.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, RetrievalError> {
    let parsed = url
        .parse()
        .map_err(|e| RetrievalError::Transport(format!("invalid url {url}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| RetrievalError::Transport(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(RetrievalError::Status(status.as_u16()));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| RetrievalError::Transport(e.to_string()))?;
    Ok(bytes.to_vec())
}
