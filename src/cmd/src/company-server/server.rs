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

use std::process;
use std::sync::Arc;

use bridge_kafka::producer::KafkaProducer;
use clap::{Parser, Subcommand};
use common_base::config::company_server::{
    init_company_server_conf_by_env, init_company_server_conf_by_path, parse_company_server_conf,
    CompanyServerConfig,
};
use common_base::error::common::CommonError;
use common_base::logs::init_logger;
use common_base::utils::duration::SignedDuration;
use company_server::security::jwt::build_token_maker;
use company_server::server::http::server::{start_http_server, HttpServerState};
use company_server::storage::build_storage;
use log::{error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author="RobustMQ", version="0.0.1", about="Company service: REST API for companies with JWT bearer authentication", long_about = None)]
#[command(next_line_help = true)]
struct ArgsParams {
    /// Path to the TOML configuration file. Without it, configuration comes
    /// from the environment only.
    #[arg(short, long)]
    conf: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Issue a bearer token signed with the configured secret
    Token {
        #[arg(short, long)]
        name: String,
        /// Random when omitted
        #[arg(short, long)]
        user_id: Option<Uuid>,
        /// e.g. "15m", "1h 30m", "-10s"; defaults to auth.token_duration
        #[arg(short, long, allow_hyphen_values = true)]
        duration: Option<SignedDuration>,
    },
}

#[tokio::main]
async fn main() {
    let args = ArgsParams::parse();
    let result = match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(args.conf.as_deref()).await,
        Command::Token {
            name,
            user_id,
            duration,
        } => issue_token(args.conf.as_deref(), &name, user_id, duration),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn load_config(conf: Option<&str>) -> Result<CompanyServerConfig, CommonError> {
    match conf {
        Some(path) => init_company_server_conf_by_path(path),
        None => init_company_server_conf_by_env(),
    }
}

async fn serve(conf: Option<&str>) -> Result<(), CommonError> {
    let config = load_config(conf)?;
    init_logger(&config.log)?;

    let token_maker = build_token_maker(&config.auth)?;
    let storage = build_storage(&config.storage).await?;
    let producer =
        KafkaProducer::new(config.kafka.brokers.clone(), config.kafka.topic.clone()).await?;
    info!("events are published to topic {}", producer.topic());

    let state = Arc::new(HttpServerState::new(
        token_maker,
        storage,
        Arc::new(producer),
    ));
    start_http_server(state, config.http.port).await
}

// Only the secret matters here, so storage and kafka settings are not checked.
fn issue_token(
    conf: Option<&str>,
    name: &str,
    user_id: Option<Uuid>,
    duration: Option<SignedDuration>,
) -> Result<(), CommonError> {
    let mut config = match conf {
        Some(path) => parse_company_server_conf(&std::fs::read_to_string(path)?)?,
        None => CompanyServerConfig::default(),
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    let token_maker = build_token_maker(&config.auth)?;
    let duration = duration.unwrap_or(config.auth.token_duration);
    let token = token_maker
        .create_token(
            user_id.unwrap_or_else(Uuid::new_v4),
            name,
            duration.get_duration(),
        )
        .map_err(|e| CommonError::CommonError(e.to_string()))?;

    println!("{}", token);
    Ok(())
}
