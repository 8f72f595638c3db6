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

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::common::CommonError;
use crate::utils::duration::SignedDuration;

pub const STORAGE_TYPE_MEMORY: &str = "memory";
pub const STORAGE_TYPE_MYSQL: &str = "mysql";

pub const ENV_AUTH_SECRET: &str = "AUTH_SECRET";
pub const ENV_KAFKA_ADDR: &str = "KAFKA_ADDR";
pub const ENV_KAFKA_TOPIC: &str = "KAFKA_TOPIC";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PWD: &str = "DB_PWD";
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_PORT: &str = "PORT";
pub const ENV_STORAGE_TYPE: &str = "STORAGE_TYPE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyServerConfig {
    pub http: HttpConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub kafka: KafkaConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig { port: 8080 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret: String,
    /// Lifetime of tokens minted by the `token` command.
    pub token_duration: SignedDuration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            secret: String::new(),
            token_duration: SignedDuration::new_from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub storage_type: String,
    pub mysql: MySQLConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            storage_type: STORAGE_TYPE_MYSQL.to_string(),
            mysql: MySQLConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySQLConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub database: String,
}

impl Default for MySQLConfig {
    fn default() -> Self {
        MySQLConfig {
            user: String::new(),
            password: String::new(),
            host: "127.0.0.1:3306".to_string(),
            database: "epam".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    pub topic: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        KafkaConfig {
            brokers: Vec::new(),
            topic: "company.commands".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    Production,
    Development,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub mode: LogMode,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            mode: LogMode::Production,
            level: "info".to_string(),
        }
    }
}

/// Reads the TOML file, applies the process environment on top and checks
/// that every mandatory parameter ended up set.
pub fn init_company_server_conf_by_path(
    config_path: impl AsRef<Path>,
) -> Result<CompanyServerConfig, CommonError> {
    let content = fs::read_to_string(config_path)?;
    let mut config = parse_company_server_conf(&content)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.check_mandatory()?;
    Ok(config)
}

/// Configuration built from defaults and the environment only.
pub fn init_company_server_conf_by_env() -> Result<CompanyServerConfig, CommonError> {
    let mut config = CompanyServerConfig::default();
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.check_mandatory()?;
    Ok(config)
}

pub fn parse_company_server_conf(content: &str) -> Result<CompanyServerConfig, CommonError> {
    Ok(toml::from_str(content)?)
}

impl CompanyServerConfig {
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), CommonError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(secret) = get(ENV_AUTH_SECRET) {
            self.auth.secret = secret;
        }
        if let Some(addr) = get(ENV_KAFKA_ADDR) {
            self.kafka.brokers = addr
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|broker| !broker.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(topic) = get(ENV_KAFKA_TOPIC) {
            self.kafka.topic = topic;
        }
        if let Some(storage_type) = get(ENV_STORAGE_TYPE) {
            self.storage.storage_type = storage_type;
        }
        if let Some(user) = get(ENV_DB_USER) {
            self.storage.mysql.user = user;
        }
        if let Some(password) = get(ENV_DB_PWD) {
            self.storage.mysql.password = password;
        }
        if let Some(host) = get(ENV_DB_HOST) {
            self.storage.mysql.host = host;
        }
        if let Some(database) = get(ENV_DB_NAME) {
            self.storage.mysql.database = database;
        }
        if let Some(port) = get(ENV_PORT) {
            self.http.port = port
                .parse()
                .map_err(|_| CommonError::InvalidParameter(ENV_PORT.to_string(), port.clone()))?;
        }
        Ok(())
    }

    pub fn check_mandatory(&self) -> Result<(), CommonError> {
        if self.auth.secret.is_empty() {
            return Err(CommonError::MandatoryParameterNotSet(
                ENV_AUTH_SECRET.to_string(),
            ));
        }

        if self.kafka.brokers.is_empty() {
            return Err(CommonError::MandatoryParameterNotSet(
                ENV_KAFKA_ADDR.to_string(),
            ));
        }

        if self.storage.storage_type == STORAGE_TYPE_MYSQL {
            if self.storage.mysql.user.is_empty() {
                return Err(CommonError::MandatoryParameterNotSet(
                    ENV_DB_USER.to_string(),
                ));
            }
            if self.storage.mysql.password.is_empty() {
                return Err(CommonError::MandatoryParameterNotSet(
                    ENV_DB_PWD.to_string(),
                ));
            }
        }

        Ok(())
    }
}
