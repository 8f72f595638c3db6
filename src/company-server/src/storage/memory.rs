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

use axum::async_trait;
use common_base::error::common::CommonError;
use dashmap::DashMap;
use uuid::Uuid;

use super::CompanyStorage;
use crate::types::Company;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: DashMap<Uuid, Company>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            store: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl CompanyStorage for MemoryStorage {
    async fn save_company(&self, company: &Company) -> Result<(), CommonError> {
        self.store.insert(company.id, company.clone());
        Ok(())
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, CommonError> {
        Ok(self.store.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_company(&self, id: Uuid, company: &Company) -> Result<(), CommonError> {
        let mut company = company.clone();
        company.id = id;
        self.store.insert(id, company);
        Ok(())
    }

    async fn delete_company(&self, id: Uuid) -> Result<(), CommonError> {
        self.store.remove(&id);
        Ok(())
    }
}
