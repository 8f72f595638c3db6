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

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common_base::error::common::CommonError;
use log::{error, info};
use rskafka::client::partition::{Compression, PartitionClient, UnknownTopicHandling};
use rskafka::client::ClientBuilder;
use rskafka::record::Record;
use tokio::time::timeout;

use crate::message::{headers_to_json, EventMessage};

const DEFAULT_PARTITION: i32 = 0;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventProducer: Send + Sync {
    async fn send_message(&self, message: EventMessage) -> Result<(), CommonError>;
}

/// Publishes `message` and only logs a failure. Event delivery must never
/// change the outcome of the operation that triggered it.
pub async fn send_or_log(producer: &dyn EventProducer, message: EventMessage) {
    let name = message.name.clone();
    if let Err(e) = producer.send_message(message).await {
        error!("error sending kafka message {}: {}", name, e);
    }
}

pub struct KafkaProducer {
    topic: String,
    client: PartitionClient,
}

impl KafkaProducer {
    /// Connects to `brokers` and opens partition 0 of `topic`. Fails instead of
    /// waiting when the brokers are unreachable or the topic does not exist.
    pub async fn new(brokers: Vec<String>, topic: String) -> Result<Self, CommonError> {
        timeout(CONNECT_TIMEOUT, KafkaProducer::connect(brokers.clone(), topic.clone()))
            .await
            .map_err(|_| {
                CommonError::CommonError(format!(
                    "Timed out after {:?} connecting to kafka brokers {:?} for topic {}",
                    CONNECT_TIMEOUT, brokers, topic
                ))
            })?
    }

    async fn connect(brokers: Vec<String>, topic: String) -> Result<Self, CommonError> {
        let client = ClientBuilder::new(brokers.clone())
            .build()
            .await
            .map_err(|e| {
                CommonError::CommonError(format!(
                    "Cannot connect to kafka brokers {:?}. Error: {}",
                    brokers, e
                ))
            })?;

        let partition_client = client
            .partition_client(topic.clone(), DEFAULT_PARTITION, UnknownTopicHandling::Error)
            .await
            .map_err(|e| {
                CommonError::CommonError(format!(
                    "Cannot open kafka topic {}, create it before starting. Error: {}",
                    topic, e
                ))
            })?;

        info!("Kafka producer connected. brokers:{:?}, topic:{}", brokers, topic);
        Ok(KafkaProducer {
            topic,
            client: partition_client,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl EventProducer for KafkaProducer {
    async fn send_message(&self, mut message: EventMessage) -> Result<(), CommonError> {
        let cid = message.ensure_cid().to_string();
        let headers = message.headers();
        let header_json = headers_to_json(&headers);

        let record = Record {
            key: if message.partition_key.is_empty() {
                None
            } else {
                Some(message.partition_key.into_bytes())
            },
            value: Some(message.payload),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k, v.into_bytes()))
                .collect(),
            timestamp: Utc::now(),
        };

        let offsets = self
            .client
            .produce(vec![record], Compression::NoCompression)
            .await
            .map_err(|e| {
                CommonError::CommonError(format!(
                    "Cannot send message to kafka topic {}. Error: {}",
                    self.topic, e
                ))
            })?;

        info!(
            "message sent. cid:{}, topic:{}, partition:{}, offset:{:?}, headers:{}",
            cid, self.topic, DEFAULT_PARTITION, offsets.first(), header_json
        );
        Ok(())
    }
}
