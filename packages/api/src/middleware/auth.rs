use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderName},
};
use shared::config::TokenSource;
use shared::models::auth::claims::{Privileges, GET_TIME};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

pub const X_TOKEN: HeaderName = HeaderName::from_static("x-token");

const BEARER_PREFIX: &str = "Bearer ";

/// Identity carried by a verified token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: String,
    pub privileges: Privileges,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers, state.token_source)?;

        let claims = state.auth_service.verify_token(token).map_err(|e| {
            warn!("Token verification failed: {}", e);
            ApiError::from(e)
        })?;

        Ok(AuthenticatedUser {
            user: claims.user,
            privileges: claims.privileges,
        })
    }
}

/// A capability a route can demand through [`Authorized`].
pub trait Capability {
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy)]
pub struct GetTime;

impl Capability for GetTime {
    const NAME: &'static str = GET_TIME;
}

/// An [`AuthenticatedUser`] whose token grants capability `C`.
#[derive(Debug, Clone)]
pub struct Authorized<C> {
    pub user: AuthenticatedUser,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability> FromRequestParts<AppState> for Authorized<C> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.privileges.contains(C::NAME) {
            warn!("User {} lacks privilege {}", user.user, C::NAME);
            return Err(ApiError::InsufficientPrivilege);
        }

        Ok(Authorized {
            user,
            _capability: PhantomData,
        })
    }
}

/// Pulls the raw token out of the headers chosen by `source`.
///
/// A missing header, a missing scheme prefix or an empty token means no
/// token was presented. A value that is not visible ASCII is malformed.
pub fn extract_token(headers: &HeaderMap, source: TokenSource) -> Result<&str, ApiError> {
    let header = match source {
        TokenSource::Bearer => AUTHORIZATION,
        TokenSource::Header => X_TOKEN,
    };

    let value = headers
        .get(&header)
        .ok_or(ApiError::Unauthenticated)?
        .to_str()
        .map_err(|_| {
            warn!("Invalid {} header format", header);
            ApiError::MalformedToken
        })?;

    let token = match source {
        TokenSource::Bearer => value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(ApiError::Unauthenticated)?,
        TokenSource::Header => value,
    }
    .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthenticated);
    }

    Ok(token)
}
