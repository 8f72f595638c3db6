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

use std::collections::BTreeMap;

use common_base::error::common::CommonError;
use common_base::tools::unique_id;
use serde::Serialize;

/// Correlation id header, shared with the HTTP layer.
pub const CID_HEADER: &str = "x-cid";
pub const MESSAGE_NAME_HEADER: &str = "x-message-name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMessage {
    pub partition_key: String,
    pub name: String,
    pub cid: Option<String>,
    pub payload: Vec<u8>,
}

impl EventMessage {
    pub fn json<T: Serialize>(
        name: &str,
        partition_key: &str,
        cid: Option<String>,
        data: &T,
    ) -> Result<Self, CommonError> {
        Ok(EventMessage {
            partition_key: partition_key.to_string(),
            name: name.to_string(),
            cid,
            payload: serde_json::to_vec(data)?,
        })
    }

    /// Fills in a fresh correlation id when the message does not carry one.
    pub fn ensure_cid(&mut self) -> &str {
        self.cid.get_or_insert_with(unique_id)
    }

    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(MESSAGE_NAME_HEADER.to_string(), self.name.clone());
        if let Some(cid) = &self.cid {
            headers.insert(CID_HEADER.to_string(), cid.clone());
        }
        headers
    }
}

pub fn headers_to_json(headers: &BTreeMap<String, String>) -> String {
    serde_json::to_string(headers).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_message_test() {
        let data = json!({ "name": "test-company", "employees": 10 });
        let message = EventMessage::json("COMPANY_CREATED", "", None, &data).unwrap();

        assert_eq!(message.name, "COMPANY_CREATED");
        assert_eq!(message.partition_key, "");
        let decoded: serde_json::Value = serde_json::from_slice(&message.payload).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn headers_test() {
        let mut message =
            EventMessage::json("COMPANY_DELETED", "", Some("cid-1".to_string()), &"id").unwrap();
        let headers = message.headers();
        assert_eq!(headers.get(MESSAGE_NAME_HEADER).unwrap(), "COMPANY_DELETED");
        assert_eq!(headers.get(CID_HEADER).unwrap(), "cid-1");

        assert_eq!(message.ensure_cid(), "cid-1");
        assert_eq!(
            headers_to_json(&headers),
            r#"{"x-cid":"cid-1","x-message-name":"COMPANY_DELETED"}"#
        );
    }

    #[test]
    fn ensure_cid_test() {
        let mut message = EventMessage::json("COMPANY_UPDATED", "", None, &"x").unwrap();
        assert!(!message.headers().contains_key(CID_HEADER));

        let cid = message.ensure_cid().to_string();
        assert_eq!(cid.len(), 36);
        assert_eq!(message.headers().get(CID_HEADER), Some(&cid));
        assert_eq!(message.ensure_cid(), cid);
    }
}
