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

use std::net::AddrParseError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("{0}")]
    CommonError(String),

    #[error(transparent)]
    FromIoError(#[from] std::io::Error),

    #[error(transparent)]
    FromAddrParseError(#[from] AddrParseError),

    #[error(transparent)]
    FromSerdeJsonError(#[from] serde_json::Error),

    #[error(transparent)]
    FromTomlError(#[from] toml::de::Error),

    #[error(transparent)]
    FromMySQLError(#[from] mysql::Error),

    #[error("Failed to set up the logger: {0}")]
    LoggerSetupError(String),

    #[error("Storage type {0} is not supported, use memory or mysql")]
    UnavailableStorageType(String),

    #[error("mandatory parameters not set ({0})")]
    MandatoryParameterNotSet(String),

    #[error("invalid value {1} for parameter {0}")]
    InvalidParameter(String, String),

    #[error("Blocking task failed: {0}")]
    BlockingTaskError(String),
}
