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

use axum::async_trait;
use common_base::config::company_server::{StorageConfig, STORAGE_TYPE_MEMORY, STORAGE_TYPE_MYSQL};
use common_base::error::common::CommonError;
use uuid::Uuid;

use crate::types::Company;

use self::memory::MemoryStorage;
use self::mysql::MySQLStorage;

pub mod memory;
pub mod mysql;

#[async_trait]
pub trait CompanyStorage: Send + Sync {
    async fn save_company(&self, company: &Company) -> Result<(), CommonError>;
    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, CommonError>;
    async fn update_company(&self, id: Uuid, company: &Company) -> Result<(), CommonError>;
    async fn delete_company(&self, id: Uuid) -> Result<(), CommonError>;
}

pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn CompanyStorage>, CommonError> {
    match config.storage_type.as_str() {
        STORAGE_TYPE_MEMORY => Ok(Arc::new(MemoryStorage::new())),
        STORAGE_TYPE_MYSQL => Ok(Arc::new(MySQLStorage::connect(&config.mysql).await?)),
        other => Err(CommonError::UnavailableStorageType(other.to_string())),
    }
}
