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

//! Shared fixtures for the end-to-end router tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use bridge_kafka::message::EventMessage;
use bridge_kafka::producer::EventProducer;
use chrono::TimeDelta;
use common_base::error::common::CommonError;
use common_jwt::jwt_manager::{JwtTokenMaker, TokenMaker};
use company_server::server::http::server::{routes_v1, HttpServerState};
use company_server::storage::memory::MemoryStorage;
use company_server::types::Company;
use mockall::mock;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET_KEY: &str = "KLguRWx03zXcWwDXywrxgwTS7r39QaF1";

mock! {
    pub Producer {}

    #[async_trait]
    impl EventProducer for Producer {
        async fn send_message(&self, message: EventMessage) -> Result<(), CommonError>;
    }
}

pub struct TestServer {
    pub app: Router,
    pub storage: Arc<MemoryStorage>,
    pub token_maker: Arc<JwtTokenMaker>,
}

impl TestServer {
    pub fn new(producer: MockProducer) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let token_maker = Arc::new(JwtTokenMaker::new(SECRET_KEY).unwrap());
        let state = Arc::new(HttpServerState::new(
            token_maker.clone(),
            storage.clone(),
            Arc::new(producer),
        ));
        TestServer {
            app: routes_v1(state),
            storage,
            token_maker,
        }
    }

    pub fn token(&self, duration: TimeDelta) -> String {
        self.token_maker
            .create_token(Uuid::new_v4(), "admin", duration)
            .unwrap()
    }

    /// Sends one request through the router; a `Null` body means the response
    /// body was empty.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

pub fn company() -> Company {
    Company {
        id: Uuid::new_v4(),
        name: "test-company".to_string(),
        description: "company used in tests".to_string(),
        employees: 10,
        registered: true,
        company_type: 1,
    }
}
