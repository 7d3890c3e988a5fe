use std::{io::Read, sync::Arc};

use clap::Parser;
use teller::{
    broker::{KafkaAdmin, KafkaProducer},
    config::AppConfig,
    context::InvocationContext,
    handler::InvocationHandler,
    models::TransactionEvent,
    publisher::{MessagePublisher, ProvisioningState, TopicProvisioner},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Publishes one transaction event to the configured Kafka topic.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The transaction event as JSON; read from stdin when omitted.
    #[arg(long)]
    event: Option<String>,

    /// Directory holding the optional app.yaml configuration file.
    #[arg(long)]
    config_dir: Option<String>,

    /// Correlation id attached to the invocation's log output.
    #[arg(long, default_value = "local")]
    trace_id: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(cli.config_dir.as_deref())?;
    tracing::debug!(topic = %config.topic_name, brokers = %config.bootstrap_address, "Configuration loaded.");

    let raw_event = match cli.event {
        Some(event) => event,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let event: TransactionEvent = serde_json::from_str(&raw_event)?;

    let admin = Arc::new(KafkaAdmin::from_config(&config));
    let producer = Arc::new(KafkaProducer::from_config(&config));
    let provisioner = TopicProvisioner::new(
        admin,
        config.topic_spec(),
        config.call_timeout_ms,
        ProvisioningState::new(),
    );
    let publisher =
        MessagePublisher::new(producer, config.topic_name.clone(), config.call_timeout_ms);
    let handler = InvocationHandler::new(provisioner, publisher);

    let ctx = InvocationContext::new(cli.trace_id);
    let result = handler.handle(&ctx, event).await;

    // The result contract carries only the status; diagnostics are in the
    // log output above.
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
