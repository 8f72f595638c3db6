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

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// `200` with the JSON rendering of `data`.
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// `200` with a literal `null` body.
pub fn empty_success_response() -> Response {
    (StatusCode::OK, Json(Value::Null)).into_response()
}

/// Error body `{"error": .., "message": ..}`; `error` is left out when there
/// is no underlying cause worth showing.
pub fn error_response(status: StatusCode, message: &str, error: Option<String>) -> Response {
    let body = match error {
        Some(error) => json!({ "error": error, "message": message }),
        None => json!({ "message": message }),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_response_test() {
        let response = success_response(json!({ "name": "test-company" }));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "test-company");

        let response = empty_success_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Value::Null);
    }

    #[tokio::test]
    async fn error_response_test() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            "unable to fetch company",
            Some("connection refused".to_string()),
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "unable to fetch company");
        assert_eq!(body["error"], "connection refused");

        let response = error_response(StatusCode::BAD_REQUEST, "company not found", None);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "message": "company not found" }));
    }
}
