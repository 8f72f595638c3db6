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

use axum::http::{Method, StatusCode};
use bridge_kafka::message::CID_HEADER;
use chrono::TimeDelta;
use common_base::error::common::CommonError;
use company_server::storage::CompanyStorage;
use company_service_test::{company, MockProducer, TestServer};
use serde_json::{json, Value};
use uuid::Uuid;

fn company_uri(id: Uuid) -> String {
    format!("/v1/company/{}", id)
}

#[tokio::test]
async fn get_company_test() {
    let server = TestServer::new(MockProducer::new());
    let company = company();
    server.storage.save_company(&company).await.unwrap();

    let (status, body) = server
        .send(Method::GET, &company_uri(company.id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_value(&company).unwrap());
}

#[tokio::test]
async fn get_unknown_company_test() {
    let server = TestServer::new(MockProducer::new());

    let (status, body) = server
        .send(Method::GET, &company_uri(Uuid::new_v4()), None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "company not found" }));
}

#[tokio::test]
async fn get_invalid_id_test() {
    let server = TestServer::new(MockProducer::new());

    let (status, body) = server
        .send(Method::GET, "/v1/company/not-a-uuid", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid company id");
}

#[tokio::test]
async fn create_company_test() {
    let company = company();
    let expected = serde_json::to_value(&company).unwrap();

    let mut producer = MockProducer::new();
    producer
        .expect_send_message()
        .withf(move |message| {
            let payload: Value = serde_json::from_slice(&message.payload).unwrap();
            message.name == "COMPANY_CREATED" && message.partition_key.is_empty() && payload == expected
        })
        .times(1)
        .returning(|_| Ok(()));

    let server = TestServer::new(producer);
    let token = server.token(TimeDelta::minutes(1));
    let (status, body) = server
        .send(
            Method::POST,
            "/v1/company/",
            Some(&token),
            Some(serde_json::to_value(&company).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert_eq!(server.storage.get_company(company.id).await.unwrap(), Some(company));
}

#[tokio::test]
async fn create_company_forwards_cid_test() {
    let mut producer = MockProducer::new();
    producer
        .expect_send_message()
        .withf(|message| message.cid.as_deref() == Some("cid-42"))
        .times(1)
        .returning(|_| Ok(()));

    let server = TestServer::new(producer);
    let token = server.token(TimeDelta::minutes(1));
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/v1/company/")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .header(CID_HEADER, "cid-42")
        .body(axum::body::Body::from(
            serde_json::to_string(&company()).unwrap(),
        ))
        .unwrap();

    let response = tower::ServiceExt::oneshot(server.app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_company_requires_token_test() {
    let server = TestServer::new(MockProducer::new());

    let (status, body) = server
        .send(
            Method::POST,
            "/v1/company/",
            None,
            Some(serde_json::to_value(company()).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "authorization header is not provided" }));
    assert!(server.storage.is_empty());
}

#[tokio::test]
async fn create_company_expired_token_test() {
    let server = TestServer::new(MockProducer::new());
    let token = server.token(TimeDelta::seconds(-10));

    let (status, body) = server
        .send(
            Method::POST,
            "/v1/company/",
            Some(&token),
            Some(serde_json::to_value(company()).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, Value::Null);
    assert!(server.storage.is_empty());
}

#[tokio::test]
async fn create_company_bad_request_test() {
    let server = TestServer::new(MockProducer::new());
    let token = server.token(TimeDelta::minutes(1));

    let mut too_long = serde_json::to_value(company()).unwrap();
    too_long["name"] = json!("a company name that is too long");
    let bodies = [
        json!({ "name": "test-company" }),
        json!({ "uuid": "not-a-uuid", "name": "x", "employees": 1, "registered": true, "companyType": 1 }),
        json!({ "uuid": Uuid::nil(), "name": "x", "employees": 1, "registered": true, "companyType": 1 }),
        too_long,
    ];

    for body in bodies {
        let (status, response) = server
            .send(Method::POST, "/v1/company/", Some(&token), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response["message"],
            "invalid request. Please check the request body"
        );
        assert!(response["error"].is_string());
    }
    assert!(server.storage.is_empty());
}

#[tokio::test]
async fn publish_failure_keeps_success_test() {
    let mut producer = MockProducer::new();
    producer
        .expect_send_message()
        .times(1)
        .returning(|_| Err(CommonError::CommonError("broker down".to_string())));

    let server = TestServer::new(producer);
    let token = server.token(TimeDelta::minutes(1));
    let company = company();
    let (status, body) = server
        .send(
            Method::POST,
            "/v1/company/",
            Some(&token),
            Some(serde_json::to_value(&company).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert!(server.storage.get_company(company.id).await.unwrap().is_some());
}

#[tokio::test]
async fn patch_company_test() {
    let mut producer = MockProducer::new();
    producer
        .expect_send_message()
        .withf(|message| message.name == "COMPANY_UPDATED")
        .times(1)
        .returning(|_| Ok(()));

    let server = TestServer::new(producer);
    let company = company();
    server.storage.save_company(&company).await.unwrap();

    let mut changed = company.clone();
    changed.id = Uuid::new_v4();
    changed.employees = 250;
    changed.registered = false;

    let token = server.token(TimeDelta::minutes(1));
    let (status, body) = server
        .send(
            Method::PATCH,
            &company_uri(company.id),
            Some(&token),
            Some(serde_json::to_value(&changed).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let stored = server.storage.get_company(company.id).await.unwrap().unwrap();
    assert_eq!(stored.id, company.id);
    assert_eq!(stored.employees, 250);
    assert!(!stored.registered);
    assert!(server.storage.get_company(changed.id).await.unwrap().is_none());
}

#[tokio::test]
async fn patch_company_requires_token_test() {
    let server = TestServer::new(MockProducer::new());
    let company = company();
    server.storage.save_company(&company).await.unwrap();

    let mut changed = company.clone();
    changed.employees = 99;
    let (status, _) = server
        .send(
            Method::PATCH,
            &company_uri(company.id),
            Some("invalid.token.here"),
            Some(serde_json::to_value(&changed).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        server.storage.get_company(company.id).await.unwrap(),
        Some(company)
    );
}

#[tokio::test]
async fn delete_company_test() {
    let server_company = company();
    let deleted_id = server_company.id.to_string();

    let mut producer = MockProducer::new();
    producer
        .expect_send_message()
        .withf(move |message| {
            let payload: String = serde_json::from_slice(&message.payload).unwrap();
            message.name == "COMPANY_DELETED" && payload == deleted_id
        })
        .times(1)
        .returning(|_| Ok(()));

    let server = TestServer::new(producer);
    server.storage.save_company(&server_company).await.unwrap();

    let token = server.token(TimeDelta::minutes(1));
    let (status, body) = server
        .send(Method::DELETE, &company_uri(server_company.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert!(server.storage.is_empty());
}

#[tokio::test]
async fn delete_company_unsupported_scheme_test() {
    let server = TestServer::new(MockProducer::new());
    let company = company();
    server.storage.save_company(&company).await.unwrap();

    let request = axum::http::Request::builder()
        .method(Method::DELETE)
        .uri(company_uri(company.id))
        .header("authorization", "Basic abc123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(server.app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(server.storage.len(), 1);
}
