use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::LinguaError;

const AGENT: &str = concat!("linguaspark/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

/// One shared client. No timeout beyond the transport defaults.
pub fn http_client() -> Result<Client, LinguaError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(USER_AGENT, reqwest::header::HeaderValue::from_static(AGENT));

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| LinguaError::Custom(format!("HTTP client build failed: {e}")))
}

/// Splits a response into success or `(status, body)`.
pub async fn ensure_success(resp: Response) -> Result<Response, (u16, String)> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err((status.as_u16(), body))
}
