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

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::{Extension, Json};
use bridge_kafka::message::{EventMessage, CID_HEADER};
use bridge_kafka::producer::send_or_log;
use common_base::http_response::{empty_success_response, error_response, success_response};
use log::{error, info};
use serde::Serialize;
use uuid::Uuid;

use crate::types::Company;

use super::auth::AuthorizationPayload;
use super::server::HttpServerState;

pub const EVENT_COMPANY_CREATED: &str = "COMPANY_CREATED";
pub const EVENT_COMPANY_UPDATED: &str = "COMPANY_UPDATED";
pub const EVENT_COMPANY_DELETED: &str = "COMPANY_DELETED";

const MSG_INVALID_ID: &str = "invalid company id";
const MSG_INVALID_REQUEST: &str = "invalid request. Please check the request body";
const MSG_FETCH_FAILED: &str = "unable to fetch company";
const MSG_NOT_FOUND: &str = "company not found";
const MSG_PROCESSING_FAILED: &str = "error occurred while processing request";

pub async fn get_company(
    State(state): State<Arc<HttpServerState>>,
    Path(id): Path<String>,
) -> Response {
    info!("received getCompany request. id:{}", id);
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.storage.get_company(id).await {
        Ok(Some(company)) => success_response(company),
        Ok(None) => error_response(StatusCode::BAD_REQUEST, MSG_NOT_FOUND, None),
        Err(e) => error_response(StatusCode::BAD_REQUEST, MSG_FETCH_FAILED, Some(e.to_string())),
    }
}

pub async fn create_company(
    State(state): State<Arc<HttpServerState>>,
    Extension(payload): Extension<AuthorizationPayload>,
    headers: HeaderMap,
    body: Result<Json<Company>, JsonRejection>,
) -> Response {
    let company = match bind_company(body) {
        Ok(company) => company,
        Err(response) => return response,
    };
    info!(
        "received createCompany request. user_id:{}, company:{:?}",
        payload.0.user_id, company
    );

    if let Err(e) = state.storage.save_company(&company).await {
        error!("error saving company {}: {}", company.id, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_PROCESSING_FAILED, None);
    }

    publish(&state, EVENT_COMPANY_CREATED, &headers, &company).await;
    empty_success_response()
}

pub async fn patch_company(
    State(state): State<Arc<HttpServerState>>,
    Extension(payload): Extension<AuthorizationPayload>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Company>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut company = match bind_company(body) {
        Ok(company) => company,
        Err(response) => return response,
    };
    info!(
        "received patchCompany request. user_id:{}, id:{}, company:{:?}",
        payload.0.user_id, id, company
    );

    if let Err(e) = state.storage.update_company(id, &company).await {
        error!("error updating company {}: {}", id, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_PROCESSING_FAILED, None);
    }

    company.id = id;
    publish(&state, EVENT_COMPANY_UPDATED, &headers, &company).await;
    empty_success_response()
}

pub async fn delete_company(
    State(state): State<Arc<HttpServerState>>,
    Extension(payload): Extension<AuthorizationPayload>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    info!(
        "received deleteCompany request. user_id:{}, id:{}",
        payload.0.user_id, id
    );
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if let Err(e) = state.storage.delete_company(id).await {
        error!("error deleting company {}: {}", id, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_PROCESSING_FAILED, None);
    }

    publish(&state, EVENT_COMPANY_DELETED, &headers, &id.to_string()).await;
    empty_success_response()
}

fn parse_id(id: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(id)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, MSG_INVALID_ID, Some(e.to_string())))
}

/// Unwraps the JSON body and runs the field rules on it.
fn bind_company(body: Result<Json<Company>, JsonRejection>) -> Result<Company, Response> {
    let invalid = |detail: String| {
        error!("error binding request body: {}", detail);
        error_response(StatusCode::BAD_REQUEST, MSG_INVALID_REQUEST, Some(detail))
    };

    let Json(company) = body.map_err(|e| invalid(e.body_text()))?;
    company.check().map_err(|e| invalid(e.to_string()))?;
    Ok(company)
}

async fn publish<T: Serialize>(state: &HttpServerState, name: &str, headers: &HeaderMap, data: &T) {
    let cid = headers
        .get(CID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    match EventMessage::json(name, "", cid, data) {
        Ok(message) => send_or_log(state.producer.as_ref(), message).await,
        Err(e) => error!("error encoding kafka message {}: {}", name, e),
    }
}
