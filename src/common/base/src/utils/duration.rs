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

use chrono::TimeDelta;
use humantime::format_duration;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// A human readable time span that may be negative.
///
/// Parses everything `humantime` understands ("1h 30m", "10s", ...) with an
/// optional leading `-`, so an already expired token can be requested with
/// `-10s`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct SignedDuration {
    duration: TimeDelta,
}

impl SignedDuration {
    pub const ZERO: SignedDuration = SignedDuration {
        duration: TimeDelta::zero(),
    };

    pub fn new_from_secs(secs: i64) -> SignedDuration {
        SignedDuration {
            duration: TimeDelta::seconds(secs),
        }
    }

    pub fn as_human_time_string(&self) -> String {
        let abs = self.duration.abs().to_std().unwrap_or_default();
        if self.is_negative() {
            format!("-{}", format_duration(abs))
        } else {
            format!("{}", format_duration(abs))
        }
    }

    pub fn as_secs(&self) -> i64 {
        self.duration.num_seconds()
    }

    pub fn get_duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn is_negative(&self) -> bool {
        self.duration < TimeDelta::zero()
    }
}

impl FromStr for SignedDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (negative, value) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s.as_str()),
        };

        if value == "0" {
            return Ok(SignedDuration::ZERO);
        }

        let parsed = humantime::parse_duration(value).map_err(|e| format!("{e}"))?;
        let duration = TimeDelta::from_std(parsed)
            .map_err(|_| format!("Value too big for a duration: {value}"))?;

        Ok(SignedDuration {
            duration: if negative { -duration } else { duration },
        })
    }
}

impl Display for SignedDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_human_time_string())
    }
}

impl Serialize for SignedDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_human_time_string())
    }
}

struct SignedDurationVisitor;

impl<'de> Deserialize<'de> for SignedDuration {
    fn deserialize<D>(deserializer: D) -> Result<SignedDuration, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SignedDurationVisitor)
    }
}

impl Visitor<'_> for SignedDurationVisitor {
    type Value = SignedDuration;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a humantime duration string or a number of seconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SignedDuration::new_from_secs(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let secs = i64::try_from(value).map_err(E::custom)?;
        Ok(SignedDuration::new_from_secs(secs))
    }
}
