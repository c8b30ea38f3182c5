//! Google sign-in completion.
//!
//! Sign-in happens in a browser against the backend; the backend then
//! redirects to a callback URI carrying either a token or a failure status.
//! [`parse_auth_callback`] interprets that URI and [`complete_login`]
//! persists the resulting session.

use potaful_store::PreferenceStore;
use reqwest::Url;
use url::form_urlencoded;

use crate::api::PotApi;
use crate::error::{ApiError, ApiResult};
use crate::responses::UserProfile;

/// Parameter names that may carry the token, in lookup order.
const TOKEN_KEYS: [&str; 3] = ["token", "access_token", "auth_token"];

const DEFAULT_FAILURE_MESSAGE: &str = "Login failed.";

/// Outcome of a sign-in redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCallback {
    /// The backend issued a token.
    Token(String),
    /// The backend reported `status=FAILED`.
    Failed(String),
    /// Neither a token nor a failure status was present.
    MissingToken,
}

/// Interpret the redirect URI produced by the backend after sign-in.
///
/// The token is looked up in the query string first and then in the
/// fragment (`#token=...`).
pub fn parse_auth_callback(uri: &str) -> ApiResult<AuthCallback> {
    let url = Url::parse(uri.trim()).map_err(|e| ApiError::InvalidUrl(format!("{uri}: {e}")))?;

    let query = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    if query("status").is_some_and(|s| s.eq_ignore_ascii_case("FAILED")) {
        let message = query("message")
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        return Ok(AuthCallback::Failed(message));
    }

    let from_query = TOKEN_KEYS
        .iter()
        .find_map(|key| query(key).filter(|t| !t.is_empty()));

    let token = from_query.or_else(|| {
        let params: Vec<(String, String)> =
            form_urlencoded::parse(url.fragment()?.as_bytes())
                .into_owned()
                .collect();
        TOKEN_KEYS.iter().find_map(|key| {
            params
                .iter()
                .find(|(k, v)| k == key && !v.is_empty())
                .map(|(_, v)| v.clone())
        })
    });

    Ok(match token {
        Some(token) => AuthCallback::Token(token),
        None => AuthCallback::MissingToken,
    })
}

/// Result of [`complete_login`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// `None` when the profile could not be fetched; the login still stands.
    pub profile: Option<UserProfile>,
}

/// Persist `token` as the active session and cache the user's profile.
///
/// A failed profile fetch is logged and tolerated: the session is already
/// saved and the profile can be refreshed later.
pub async fn complete_login(
    api: &PotApi,
    store: &mut PreferenceStore,
    token: &str,
) -> ApiResult<LoginOutcome> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }

    store.save_auth_token(token)?;
    store.set_logged_in(true)?;
    store.set_onboarding_completed(true)?;
    tracing::info!(token_prefix = %token_prefix(token), "Session stored");

    match api.user_profile(token).await {
        Ok(profile) => {
            save_profile(store, &profile)?;
            tracing::info!(user_id = %profile.id, "Profile cached");
            Ok(LoginOutcome {
                profile: Some(profile),
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Profile fetch failed after login");
            Ok(LoginOutcome { profile: None })
        }
    }
}

/// Write profile fields into the store. A missing photo leaves any
/// previously stored photo untouched.
pub fn save_profile(store: &mut PreferenceStore, profile: &UserProfile) -> ApiResult<()> {
    store.save_user_id(&profile.id)?;
    store.save_user_name(&profile.full_name())?;
    store.save_user_email(&profile.email)?;
    if let Some(photo) = &profile.photo {
        store.save_user_photo(photo)?;
    }
    Ok(())
}

/// First few characters of a token, for logs.
fn token_prefix(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{prefix}...")
}
