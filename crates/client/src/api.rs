//! REST client for the pot service.
//!
//! Wraps the authentication and `mypot` endpoints using [`reqwest`].
//! Every call is a single request; nothing is retried or cached.

use std::time::Duration;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::responses::{
    AddPotRequest, AddedPot, Envelope, GoogleAuthUrl, HydrationList, PotDetail, PotList,
    ProfileData, UserProfile, WateringAck, STATUS_SUCCESS,
};

/// HTTP client for the pot service.
#[derive(Debug, Clone)]
pub struct PotApi {
    client: reqwest::Client,
    base_url: Url,
}

impl PotApi {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url` - e.g. `https://api.lutfialvarop.cloud`.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the URL the user must open to start Google sign-in.
    ///
    /// Sends `GET api/auth/google`; the only unauthenticated call.
    pub async fn google_auth_url(&self) -> ApiResult<String> {
        let data: GoogleAuthUrl = self
            .execute(Method::GET, &["api", "auth", "google"], None, None::<&()>)
            .await?;
        Ok(data.auth_url)
    }

    /// Fetch the signed-in user's profile (`GET api/auth/profile`).
    pub async fn user_profile(&self, token: &str) -> ApiResult<UserProfile> {
        let token = require_token(token)?;
        let data: ProfileData = self
            .execute(Method::GET, &["api", "auth", "profile"], Some(token), None::<&()>)
            .await?;
        Ok(data.user)
    }

    /// Register a physical pot with the user's account (`POST api/mypot/add`).
    pub async fn add_pot(&self, token: &str, pot_id: &str) -> ApiResult<AddedPot> {
        let token = require_token(token)?;
        let pot_id = require_pot_id(pot_id)?;

        let added: AddedPot = self
            .execute(
                Method::POST,
                &["api", "mypot", "add"],
                Some(token),
                Some(&AddPotRequest { pot_id }),
            )
            .await?;

        tracing::info!(pot_id = %added.pot_id, type_name = %added.type_name, "Pot added");
        Ok(added)
    }

    /// List the user's pots (`GET api/mypot`).
    pub async fn my_pots(&self, token: &str) -> ApiResult<PotList> {
        let token = require_token(token)?;
        self.execute(Method::GET, &["api", "mypot"], Some(token), None::<&()>)
            .await
    }

    /// Latest sensor payload for one pot (`GET api/mypot/{pot_id}/data`).
    pub async fn pot_detail(&self, token: &str, pot_id: &str) -> ApiResult<PotDetail> {
        let token = require_token(token)?;
        let pot_id = require_pot_id(pot_id)?;
        self.execute(
            Method::GET,
            &["api", "mypot", pot_id, "data"],
            Some(token),
            None::<&()>,
        )
        .await
    }

    /// Ask the pot to water itself (`POST api/mypot/{pot_id}/watering`).
    pub async fn water_pot(&self, token: &str, pot_id: &str) -> ApiResult<WateringAck> {
        let token = require_token(token)?;
        let pot_id = require_pot_id(pot_id)?;

        let ack: WateringAck = self
            .execute(
                Method::POST,
                &["api", "mypot", pot_id, "watering"],
                Some(token),
                None::<&()>,
            )
            .await?;

        tracing::info!(pot_id = %ack.pot_id, status = %ack.status, "Watering command sent");
        Ok(ack)
    }

    /// Hydration urgency for every pot (`GET api/mypot/hydration`).
    pub async fn hydration_summary(&self, token: &str) -> ApiResult<HydrationList> {
        let token = require_token(token)?;
        self.execute(
            Method::GET,
            &["api", "mypot", "hydration"],
            Some(token),
            None::<&()>,
        )
        .await
    }

    // ---- private helpers ----

    /// Send one request and unwrap the response envelope.
    async fn execute<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = endpoint(&self.base_url, segments)?;
        tracing::debug!(method = %method, path = url.path(), "Pot service request");

        let mut request = self.client.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = ensure_success(request.send().await?).await?;
        let envelope: Envelope<T> = response.json().await?;
        unwrap_envelope(envelope)
    }
}

/// Parse a base URL, rejecting ones that cannot carry path segments.
pub(crate) fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{raw}: not a base URL")));
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Ensure the response has a success status code.
///
/// On failure the error message is the JSON body's `message` field when
/// present, otherwise `Error: <status>`.
pub(crate) async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), message = %message, "Request failed");

    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("Error: {status}"))
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> ApiResult<T> {
    if envelope.status != STATUS_SUCCESS {
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    envelope.data.ok_or(ApiError::MissingData)
}

fn require_token(token: &str) -> ApiResult<&str> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }
    Ok(token)
}

fn require_pot_id(pot_id: &str) -> ApiResult<&str> {
    let pot_id = pot_id.trim();
    if pot_id.is_empty() {
        return Err(ApiError::InvalidInput("Pot ID cannot be empty".into()));
    }
    Ok(pot_id)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let base = parse_base_url("https://api.example.com/").unwrap();
        let url = endpoint(&base, &["api", "mypot", "hydration"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/mypot/hydration");
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_ids() {
        let base = parse_base_url("http://localhost:8080/v2").unwrap();
        let url = endpoint(&base, &["api", "mypot", "a b/c", "data"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v2/api/mypot/a%20b%2Fc/data");
    }

    #[test]
    fn invalid_base_url() {
        assert_matches!(parse_base_url("not a url"), Err(ApiError::InvalidUrl(_)));
        assert_matches!(parse_base_url("mailto:x@example.com"), Err(ApiError::InvalidUrl(_)));
    }

    #[test]
    fn error_message_prefers_body_message() {
        assert_eq!(error_message(400, r#"{"message":"Pot already added"}"#), "Pot already added");
        assert_eq!(error_message(502, "<html>bad gateway</html>"), "Error: 502");
        assert_eq!(error_message(500, r#"{"message": 12}"#), "Error: 500");
    }

    #[test]
    fn envelope_status_is_checked() {
        let rejected: Envelope<u8> = Envelope {
            status: "FAILED".into(),
            message: "Invalid pot".into(),
            data: Some(1),
        };
        assert_matches!(
            unwrap_envelope(rejected),
            Err(ApiError::Rejected { message }) if message == "Invalid pot"
        );

        let empty: Envelope<u8> = Envelope {
            status: STATUS_SUCCESS.into(),
            message: String::new(),
            data: None,
        };
        assert_matches!(unwrap_envelope(empty), Err(ApiError::MissingData));
    }

    #[test]
    fn blank_inputs_are_rejected() {
        assert_matches!(require_token("  "), Err(ApiError::MissingToken));
        assert_matches!(require_pot_id(""), Err(ApiError::InvalidInput(_)));
        assert_eq!(require_pot_id(" t8NT ").unwrap(), "t8NT");
    }
}
