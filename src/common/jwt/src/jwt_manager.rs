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

use crate::json_web_token::{Claims, ISSUER};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub const MIN_SECRET_KEY_SIZE: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    #[error("invalid key size: key must have at least {0} characters")]
    WeakSecret(usize),

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("Cannot generate JWT token. Error: {0}")]
    GenerateToken(String),
}

/// Issues and verifies bearer tokens. Implementations hold no mutable state
/// and are shared between requests behind an `Arc`.
pub trait TokenMaker: Send + Sync {
    fn create_token(&self, user_id: Uuid, name: &str, duration: TimeDelta) -> Result<String, JwtError>;
    fn verify_token(&self, token: &str) -> Result<Claims, JwtError>;
}

/// HMAC-SHA256 token maker bound to one secret for its whole lifetime.
pub struct JwtTokenMaker {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenMaker {
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_KEY_SIZE {
            return Err(JwtError::WeakSecret(MIN_SECRET_KEY_SIZE));
        }

        let algorithm = Algorithm::HS256;
        Ok(JwtTokenMaker {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: JwtTokenMaker::create_validation(algorithm),
        })
    }

    // Expiry is checked against the caller's clock in `verify_token_at`, so the
    // library only checks signature, algorithm and issuer.
    fn create_validation(algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }

    /// Verifies `token` as of `now`.
    ///
    /// Every structural, algorithm or signature problem is reported as
    /// [`JwtError::InvalidToken`]; only a correctly signed token past its
    /// expiry is [`JwtError::ExpiredToken`].
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|_| JwtError::InvalidToken)?;
        if header.alg != self.algorithm {
            return Err(JwtError::InvalidToken);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| JwtError::InvalidToken)?;

        let claims = token_data.claims;
        if claims.is_expired_at(now) {
            return Err(JwtError::ExpiredToken);
        }
        Ok(claims)
    }
}

impl TokenMaker for JwtTokenMaker {
    fn create_token(&self, user_id: Uuid, name: &str, duration: TimeDelta) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, name, duration)?;
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerateToken(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_token_at(token, Utc::now())
    }
}

impl fmt::Debug for JwtTokenMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenMaker")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
