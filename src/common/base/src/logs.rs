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

use std::str::FromStr;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::json::JsonEncoder;
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::Encode;

use crate::config::company_server::{LogConfig, LogMode};
use crate::error::common::CommonError;

const STDERR_APPENDER: &str = "stderr";
const DEVELOPMENT_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Installs the global logger. Production writes one JSON object per line to
/// stderr, development a coloured human readable line.
pub fn init_logger(log_config: &LogConfig) -> Result<(), CommonError> {
    let config = build_log_config(log_config)?;
    log4rs::init_config(config).map_err(|e| CommonError::LoggerSetupError(e.to_string()))?;
    Ok(())
}

pub fn build_log_config(log_config: &LogConfig) -> Result<Config, CommonError> {
    let level = LevelFilter::from_str(&log_config.level).map_err(|_| {
        CommonError::LoggerSetupError(format!("unknown log level {}", log_config.level))
    })?;

    let encoder: Box<dyn Encode> = match log_config.mode {
        LogMode::Production => Box::new(JsonEncoder::new()),
        LogMode::Development => Box::new(PatternEncoder::new(DEVELOPMENT_PATTERN)),
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(encoder)
        .build();

    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(STDERR_APPENDER).build(level))
        .map_err(|e| CommonError::LoggerSetupError(e.to_string()))
}
