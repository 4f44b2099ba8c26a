/// HTTP client for the Pinboard API
///
/// Thin `reqwest` wrapper that sends bearer-authenticated requests and
/// unwraps the `{ "success": ..., "data": ... }` response envelope. Server
/// failures surface the server's error message.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use pinboard_shared::models::{card::Card, column::Column, user::Profile};
use pinboard_shared::services::columns::ColumnWithCards;

/// Error type for API client operations
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request
    #[error("{message}")]
    Server { code: String, message: String },

    /// The envelope claimed success but carried no data
    #[error("Response envelope had no data")]
    MissingData,

    /// Endpoint requires authentication but no token is set
    #[error("Not logged in")]
    NotAuthenticated,
}

/// Response envelope, success or failure
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    code: String,
    message: String,
}

/// Login result: the authenticated profile plus tokens
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub user: Profile,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct MoveBody {
    column_id: Uuid,
    position: i32,
}

#[derive(Debug, Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

/// Pinboard API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client against `base_url` (e.g. `http://localhost:8080`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Sets the bearer token used for authenticated endpoints
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Logs in and stores the access token for subsequent requests
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthData, ApiClientError> {
        let response = self
            .http
            .post(format!("{}/v1/auth/login", self.base_url))
            .json(&LoginBody { email, password })
            .send()
            .await?;

        let auth: AuthData = unwrap_envelope(response).await?;
        self.token = Some(auth.access_token.clone());

        Ok(auth)
    }

    /// Fetches a board's columns with their cards
    pub async fn fetch_columns(
        &self,
        board_id: Uuid,
    ) -> Result<Vec<ColumnWithCards>, ApiClientError> {
        let response = self
            .authed(reqwest::Method::GET, &format!("/v1/columns/board/{}", board_id))?
            .send()
            .await?;

        unwrap_envelope(response).await
    }

    /// Moves a card to a column at a zero-based position
    pub async fn move_card(
        &self,
        card_id: Uuid,
        column_id: Uuid,
        position: i32,
    ) -> Result<Card, ApiClientError> {
        let response = self
            .authed(reqwest::Method::PUT, &format!("/v1/cards/{}/move", card_id))?
            .json(&MoveBody {
                column_id,
                position,
            })
            .send()
            .await?;

        unwrap_envelope(response).await
    }

    /// Creates a card at the end of a column
    pub async fn create_card(&self, column_id: Uuid, title: &str) -> Result<Card, ApiClientError> {
        let response = self
            .authed(
                reqwest::Method::POST,
                &format!("/v1/cards/column/{}", column_id),
            )?
            .json(&TitleBody { title })
            .send()
            .await?;

        unwrap_envelope(response).await
    }

    /// Creates a column at the end of a board
    pub async fn create_column(
        &self,
        board_id: Uuid,
        title: &str,
    ) -> Result<Column, ApiClientError> {
        let response = self
            .authed(
                reqwest::Method::POST,
                &format!("/v1/columns/board/{}", board_id),
            )?
            .json(&TitleBody { title })
            .send()
            .await?;

        unwrap_envelope(response).await
    }

    fn authed(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ApiClientError> {
        let token = self.token.as_deref().ok_or(ApiClientError::NotAuthenticated)?;

        Ok(self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token))
    }
}

/// Reads a response body as an envelope and extracts its data
async fn unwrap_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let envelope: Envelope<T> = response.json().await?;

    if !envelope.success {
        let (code, message) = envelope
            .error
            .map(|e| (e.code, e.message))
            .unwrap_or_else(|| ("unknown".to_string(), "Unknown server error".to_string()));
        return Err(ApiClientError::Server { code, message });
    }

    envelope.data.ok_or(ApiClientError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_parses() {
        let json = r##"{"success": true, "data": {"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "bug", "color": "#ff0000"}}"##;
        let envelope: Envelope<pinboard_shared::models::label::Label> =
            serde_json::from_str(json).unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().name, "bug");
    }

    #[test]
    fn test_envelope_failure_parses() {
        let json = r#"{"success": false, "error": {"code": "forbidden", "message": "nope"}}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();

        assert!(!envelope.success);
        let error = envelope.error.unwrap();
        assert_eq!(error.code, "forbidden");
        assert_eq!(error.message, "nope");
    }

    #[test]
    fn test_token_required_for_authed_requests() {
        let client = ApiClient::new("http://localhost:8080");
        let result = client.authed(reqwest::Method::GET, "/v1/boards");
        assert!(matches!(result, Err(ApiClientError::NotAuthenticated)));
    }
}
