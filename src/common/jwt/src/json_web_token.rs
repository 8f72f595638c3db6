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

use chrono::serde::ts_seconds;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jwt_manager::JwtError;

pub const ISSUER: &str = "company-service";

/// Payload carried inside every issued token.
///
/// Timestamps travel as unix seconds, so `issued_at` is truncated to the
/// second when the claims are built and a decoded token compares equal to
/// the claims it was signed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "jti")]
    pub token_id: Uuid, // JWT ID, never the user id
    #[serde(rename = "sub")]
    pub subject_name: String,
    pub user_id: Uuid,
    #[serde(rename = "iss")]
    pub issuer: String,
    #[serde(rename = "iat", with = "ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl Claims {
    /// A negative `duration` yields claims that are already expired.
    pub fn new(user_id: Uuid, subject_name: &str, duration: TimeDelta) -> Result<Self, JwtError> {
        let issued_at = Utc::now().trunc_subsecs(0);
        // NumericDate is unsigned, an expiry before the epoch could not be decoded.
        let expires_at = issued_at
            .checked_add_signed(duration)
            .filter(|expires_at| expires_at.timestamp() >= 0)
            .ok_or_else(|| {
                JwtError::GenerateToken(format!("token duration {} is out of range", duration))
            })?;

        Ok(Claims {
            token_id: Uuid::new_v4(),
            subject_name: subject_name.to_string(),
            user_id,
            issuer: ISSUER.to_string(),
            issued_at,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
