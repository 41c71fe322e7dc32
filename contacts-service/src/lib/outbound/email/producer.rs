use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use thiserror::Error;

use crate::config::Config;
use crate::domain::auth::errors::EmailDispatchError;
use crate::domain::auth::models::VerificationEmail;
use crate::domain::auth::ports::EmailDispatcher;
use crate::outbound::email::messages::EmailMessage;

#[derive(Debug, Error)]
pub enum KafkaProducerError {
    #[error("Failed to enqueue message for Kafka: {0}")]
    SendError(String),

    #[error("Failed to serialize message: {0}")]
    SerializationError(String),
}

impl From<KafkaProducerError> for EmailDispatchError {
    fn from(err: KafkaProducerError) -> Self {
        match err {
            KafkaProducerError::SerializationError(msg) => {
                EmailDispatchError::SerializationFailed(msg)
            }
            KafkaProducerError::SendError(msg) => EmailDispatchError::PublishFailed(msg),
        }
    }
}

/// Publishes email requests to Kafka for the mail relay.
pub struct KafkaEmailDispatcher {
    producer: FutureProducer,
    topic: String,
    confirmation_base_url: String,
}

impl KafkaEmailDispatcher {
    /// Create a new Kafka email dispatcher with "at least once" delivery semantics
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate messages during retries
    /// - `max.in.flight.requests.per.connection=5`: Allows pipelining with ordering guarantees
    /// - `retry.backoff.ms=100`: Backoff between retry attempts
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        tracing::info!(
            brokers = %config.kafka.brokers,
            topic = %config.kafka.topic,
            "Initializing Kafka producer for email requests"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.kafka.brokers)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "10000")
            .set("queue.buffering.max.kbytes", "1048576")
            .set("batch.num.messages", "100")
            .set("compression.type", "gzip")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "10")
            .set("max.in.flight.requests.per.connection", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        tracing::info!("Kafka producer initialized successfully");

        Ok(Self {
            producer,
            topic: config.kafka.topic.to_string(),
            confirmation_base_url: config.email.confirmation_base_url.to_string(),
        })
    }

    /// Enqueue a message keyed by recipient address.
    ///
    /// Returns once librdkafka has accepted the message. The delivery report
    /// is awaited on a spawned task and only logged.
    fn publish(&self, recipient: &str, message: &EmailMessage) -> Result<(), KafkaProducerError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| KafkaProducerError::SerializationError(e.to_string()))?;

        let record = FutureRecord::to(&self.topic)
            .key(recipient) // Partition by recipient for ordering
            .payload(&payload);

        let delivery = self
            .producer
            .send_result(record)
            .map_err(|(err, _)| KafkaProducerError::SendError(err.to_string()))?;

        let topic = self.topic.clone();
        tokio::spawn(async move {
            match delivery.await {
                Ok(Ok(_)) => {
                    tracing::debug!(topic = %topic, "Email request delivered");
                }
                Ok(Err((err, _))) => {
                    tracing::error!(
                        topic = %topic,
                        error = %err,
                        "Failed to deliver email request after all retries"
                    );
                }
                Err(_) => {
                    tracing::error!(topic = %topic, "Email request delivery was cancelled");
                }
            }
        });

        Ok(())
    }
}

#[async_trait]
impl EmailDispatcher for KafkaEmailDispatcher {
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), EmailDispatchError> {
        let message = EmailMessage::verification(email, &self.confirmation_base_url);

        self.publish(email.email.as_str(), &message).map_err(|e| {
            tracing::error!(
                "Failed to publish verification email request for {}: {}",
                email.email,
                e
            );
            e.into()
        })
    }
}
