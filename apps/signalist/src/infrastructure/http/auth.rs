//! Session extraction.
//!
//! The user id is only ever taken from a resolved session token, never from
//! a request body or query string. Job triggers carry a shared secret instead.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use subtle::ConstantTimeEq;

use crate::application::ports::SessionPort;
use crate::domain::UserId;
use crate::infrastructure::container::AdapterSet;
use crate::infrastructure::session::SESSION_COOKIE;

use super::controller::AppState;
use super::response::ApiError;

/// Header carrying the job trigger secret.
pub const JOB_TOKEN_HEADER: &str = "x-job-token";

/// Session token from `Authorization: Bearer` or the session cookie.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

async fn resolve<P: AdapterSet>(parts: &Parts, state: &AppState<P>) -> Option<UserId> {
    let token = session_token(&parts.headers)?;
    state.container.sessions.resolve(&token).await
}

/// The authenticated user; rejects with 401 when there is no valid session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl<P: AdapterSet> FromRequestParts<AppState<P>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await
            .map(Self)
            .ok_or_else(ApiError::unauthorized)
    }
}

/// The user when a valid session is present.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserId>);

impl<P: AdapterSet> FromRequestParts<AppState<P>> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve(parts, state).await))
    }
}

/// Constant-time check of the presented job secret.
fn job_token_matches(expected: Option<&str>, presented: Option<&str>) -> bool {
    match (expected, presented) {
        (Some(expected), Some(presented)) => {
            bool::from(expected.as_bytes().ct_eq(presented.trim().as_bytes()))
        }
        _ => false,
    }
}

/// Proof that a request carried the configured job secret; rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct JobToken;

impl<P: AdapterSet> FromRequestParts<AppState<P>> for JobToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(JOB_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());

        if job_token_matches(state.job_token.as_deref(), presented) {
            Ok(Self)
        } else {
            tracing::warn!(uri = %parts.uri, "rejected job trigger");
            Err(ApiError::unauthorized())
        }
    }
}
