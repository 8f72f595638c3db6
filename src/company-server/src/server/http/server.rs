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

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;
use bridge_kafka::producer::EventProducer;
use common_base::error::common::CommonError;
use common_jwt::jwt_manager::TokenMaker;
use log::info;

use crate::storage::CompanyStorage;

use super::auth::auth_middleware;
use super::company::{create_company, delete_company, get_company, patch_company};

pub const ROUTE_COMPANY: &str = "/v1/company/";
pub const ROUTE_COMPANY_ID: &str = "/v1/company/:id";

#[derive(Clone)]
pub struct HttpServerState {
    pub token_maker: Arc<dyn TokenMaker>,
    pub storage: Arc<dyn CompanyStorage>,
    pub producer: Arc<dyn EventProducer>,
}

impl HttpServerState {
    pub fn new(
        token_maker: Arc<dyn TokenMaker>,
        storage: Arc<dyn CompanyStorage>,
        producer: Arc<dyn EventProducer>,
    ) -> Self {
        Self {
            token_maker,
            storage,
            producer,
        }
    }
}

pub async fn start_http_server(state: Arc<HttpServerState>, port: u16) -> Result<(), CommonError> {
    let ip: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    let app = routes_v1(state);
    let listener = tokio::net::TcpListener::bind(ip).await?;
    info!("Company HTTP Server start success. bind addr:{}", ip);
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET is public; every mutating route sits behind the bearer token check.
pub fn routes_v1(state: Arc<HttpServerState>) -> Router {
    let auth = from_fn_with_state(state.clone(), auth_middleware);

    Router::<Arc<HttpServerState>>::new()
        .route(
            ROUTE_COMPANY,
            post(create_company).route_layer(auth.clone()),
        )
        .route(
            ROUTE_COMPANY_ID,
            get(get_company).merge(
                patch(patch_company)
                    .delete(delete_company)
                    .route_layer(auth),
            ),
        )
        .with_state(state)
}
