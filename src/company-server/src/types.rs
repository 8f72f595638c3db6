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

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

pub const COMPANY_NAME_MAX_LEN: u64 = 15;
pub const COMPANY_DESCRIPTION_MAX_LEN: u64 = 3000;

/// REST representation of a company, also the shape of the `companies` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Company {
    #[serde(rename = "uuid")]
    pub id: Uuid,
    #[validate(length(min = 1, max = COMPANY_NAME_MAX_LEN))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = COMPANY_DESCRIPTION_MAX_LEN))]
    pub description: String,
    #[validate(range(min = 1))]
    pub employees: i32,
    pub registered: bool,
    #[serde(rename = "companyType")]
    #[validate(range(min = 1))]
    pub company_type: i32,
}

impl Company {
    /// Field rules plus the check that the id is not the nil UUID.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut result = self.validate();
        if self.id.is_nil() {
            let mut errors = result.err().unwrap_or_default();
            errors.add("uuid", ValidationError::new("required"));
            result = Err(errors);
        }
        result
    }
}
