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

use ::mysql::prelude::Queryable;
use ::mysql::{OptsBuilder, Pool, PoolConstraints, PoolOpts, PooledConn};
use axum::async_trait;
use common_base::config::company_server::MySQLConfig;
use common_base::error::common::CommonError;
use log::info;
use uuid::Uuid;

use super::CompanyStorage;
use crate::types::Company;

const DEFAULT_MYSQL_PORT: u16 = 3306;
const POOL_MIN_CONNECTIONS: usize = 1;
const POOL_MAX_CONNECTIONS: usize = 10;

const CREATE_COMPANY_TYPES_TABLE: &str = "CREATE TABLE IF NOT EXISTS company_types (
    id INT NOT NULL PRIMARY KEY,
    name VARCHAR(50) NOT NULL DEFAULT ''
)";

const CREATE_COMPANIES_TABLE: &str = "CREATE TABLE IF NOT EXISTS companies (
    id CHAR(36) NOT NULL PRIMARY KEY,
    name VARCHAR(15) NOT NULL,
    description VARCHAR(3000) NOT NULL DEFAULT '',
    employees INT NOT NULL,
    registered BOOLEAN NOT NULL,
    company_type INT NOT NULL
)";

const INSERT_COMPANY: &str = "INSERT INTO companies (id, name, description, employees, registered, company_type) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_COMPANY: &str = "SELECT id, name, description, employees, registered, company_type FROM companies WHERE id = ?";
const UPDATE_COMPANY: &str = "UPDATE companies SET name = ?, description = ?, employees = ?, registered = ?, company_type = ? WHERE id = ?";
const DELETE_COMPANY: &str = "DELETE FROM companies WHERE id = ?";

type CompanyRow = (String, String, String, i32, bool, i32);

pub struct MySQLStorage {
    pool: Pool,
}

impl MySQLStorage {
    /// Opens the pool and creates the tables when they are missing.
    pub async fn connect(config: &MySQLConfig) -> Result<Self, CommonError> {
        let opts = build_opts(config)?;
        let pool = run_blocking(move || Ok(Pool::new(opts)?)).await?;

        let storage = MySQLStorage { pool };
        storage
            .with_conn(|conn| {
                conn.query_drop(CREATE_COMPANY_TYPES_TABLE)?;
                conn.query_drop(CREATE_COMPANIES_TABLE)?;
                Ok(())
            })
            .await?;

        info!(
            "MySQL storage connected. host:{}, database:{}",
            config.host, config.database
        );
        Ok(storage)
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, CommonError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PooledConn) -> Result<T, CommonError> + Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get_conn()?;
            f(&mut conn)
        })
        .await
    }
}

#[async_trait]
impl CompanyStorage for MySQLStorage {
    async fn save_company(&self, company: &Company) -> Result<(), CommonError> {
        let company = company.clone();
        self.with_conn(move |conn| {
            conn.exec_drop(
                INSERT_COMPANY,
                (
                    company.id.to_string(),
                    company.name,
                    company.description,
                    company.employees,
                    company.registered,
                    company.company_type,
                ),
            )?;
            Ok(())
        })
        .await
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, CommonError> {
        let row = self
            .with_conn(move |conn| {
                Ok(conn.exec_first::<CompanyRow, _, _>(SELECT_COMPANY, (id.to_string(),))?)
            })
            .await?;

        row.map(row_to_company).transpose()
    }

    async fn update_company(&self, id: Uuid, company: &Company) -> Result<(), CommonError> {
        let company = company.clone();
        self.with_conn(move |conn| {
            conn.exec_drop(
                UPDATE_COMPANY,
                (
                    company.name,
                    company.description,
                    company.employees,
                    company.registered,
                    company.company_type,
                    id.to_string(),
                ),
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_company(&self, id: Uuid) -> Result<(), CommonError> {
        self.with_conn(move |conn| {
            conn.exec_drop(DELETE_COMPANY, (id.to_string(),))?;
            Ok(())
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, CommonError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CommonError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CommonError::BlockingTaskError(e.to_string()))?
}

fn build_opts(config: &MySQLConfig) -> Result<OptsBuilder, CommonError> {
    let (host, port) = split_host_port(&config.host)?;
    let constraints = PoolConstraints::new(POOL_MIN_CONNECTIONS, POOL_MAX_CONNECTIONS)
        .ok_or_else(|| CommonError::CommonError("invalid mysql pool constraints".to_string()))?;

    Ok(OptsBuilder::new()
        .ip_or_hostname(Some(host))
        .tcp_port(port)
        .user(Some(config.user.clone()))
        .pass(Some(config.password.clone()))
        .db_name(Some(config.database.clone()))
        .pool_opts(PoolOpts::default().with_constraints(constraints)))
}

fn split_host_port(addr: &str) -> Result<(String, u16), CommonError> {
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse::<u16>().map_err(|_| {
                CommonError::CommonError(format!("invalid mysql port in address {}", addr))
            })?;
            Ok((host.to_string(), port))
        }
        None => Ok((addr.to_string(), DEFAULT_MYSQL_PORT)),
    }
}

fn row_to_company(row: CompanyRow) -> Result<Company, CommonError> {
    let (id, name, description, employees, registered, company_type) = row;
    let id = Uuid::parse_str(&id)
        .map_err(|e| CommonError::CommonError(format!("invalid company id {} in storage: {}", id, e)))?;
    Ok(Company {
        id,
        name,
        description,
        employees,
        registered,
        company_type,
    })
}
