// Copyright 2023 RobustMQ Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common_jwt::json_web_token::Claims;
use log::debug;
use serde_json::json;
use thiserror::Error;

use super::server::HttpServerState;

pub const AUTHORIZATION_TYPE_BEARER: &str = "bearer";

/// Identity of the caller, attached to the request by [`auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationPayload(pub Claims);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization header is not provided")]
    HeaderMissing,

    #[error("invalid authorization header format")]
    MalformedHeader,

    #[error("unsupported authorization type {0}")]
    UnsupportedScheme(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            other => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}

pub async fn auth_middleware(
    State(state): State<Arc<HttpServerState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match request.headers().get(AUTHORIZATION) {
        None => return Err(AuthError::HeaderMissing),
        Some(value) if value.is_empty() => return Err(AuthError::HeaderMissing),
        Some(value) => value.to_str().map_err(|_| AuthError::MalformedHeader)?,
    };

    let claims = {
        let mut fields = header.split_whitespace();
        let (scheme, token) = match (fields.next(), fields.next()) {
            (Some(scheme), Some(token)) => (scheme, token),
            _ => return Err(AuthError::MalformedHeader),
        };

        if !scheme.eq_ignore_ascii_case(AUTHORIZATION_TYPE_BEARER) {
            return Err(AuthError::UnsupportedScheme(scheme.to_string()));
        }

        state.token_maker.verify_token(token).map_err(|e| {
            debug!("rejecting bearer token: {}", e);
            AuthError::Unauthorized
        })?
    };

    request.extensions_mut().insert(AuthorizationPayload(claims));
    Ok(next.run(request).await)
}
