//! Command-line interface for retail-loadgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Use dev_app.json from the working directory
//! retail-loadgen
//!
//! # Explicit configuration, reproducible content
//! retail-loadgen --config configs/prod_app.yaml --seed 7
//!
//! # Topics are managed elsewhere
//! RETAIL_LOADGEN_CONFIG=app.json retail-loadgen --skip-topic-creation
//! ```
//!
//! SASL credentials can be passed through `SASL_USERNAME` and `SASL_PASSWORD`.

use anyhow::Context;
use clap::Parser;
use retail_kafka::{create_topics, BrokerSink, KafkaClient, PublishPipeline, TopicRouting};
use retail_loadgen::config::{echo_catalog, echo_config, DEFAULT_CONFIG_PATH};
use retail_loadgen::{load_catalog, load_config, logging, Overrides, RunLoop};
use retail_sink::{DocumentSink, FileSink};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "retail-loadgen")]
#[command(about = "Generate correlated retail basket and payment documents")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, env = "RETAIL_LOADGEN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed, overrides the configuration file
    #[arg(long)]
    seed: Option<u64>,

    /// Number of records to generate (0 = until interrupted), overrides the configuration file
    #[arg(long)]
    test_size: Option<u64>,

    /// Assume the basket and payment topics already exist
    #[arg(long)]
    skip_topic_creation: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        seed: cli.seed,
        test_size: cli.test_size,
    };
    let config = load_config(&cli.config, &overrides)?;

    logging::init(config.debug_level);
    info!("Starting retail-loadgen with {:?}", cli.config);

    if config.echo_config {
        echo_config(&config)?;
    }

    let catalog = load_catalog(&config.seed_file)?;
    info!(
        "Loaded seed catalog: {} stores, {} clerks, {} products",
        catalog.stores.len(),
        catalog.clerks.len(),
        catalog.products.len()
    );
    if config.echo_seed {
        echo_catalog(&catalog)?;
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);

    let mut sinks: Vec<Box<dyn DocumentSink>> = Vec::new();

    if config.write_to_file {
        let run_id = Uuid::new_v4().to_string();
        let sink = FileSink::create(&config.output_path, &run_id)
            .with_context(|| format!("Failed to open output files in {:?}", config.output_path))?;
        sinks.push(Box::new(sink));
    }

    if config.broker_enabled {
        let kafka = &config.kafka;
        if cli.skip_topic_creation {
            info!("Skipping topic creation");
        } else {
            create_topics(kafka, kafka.admin_timeout()?)
                .await
                .context("Failed to provision Kafka topics")?;
        }

        let (client, events) =
            KafkaClient::new(kafka).context("Failed to create Kafka producer")?;
        let pipeline =
            PublishPipeline::start(client, events, kafka.flush_interval, kafka.flush_timeout());
        info!(
            "Publishing to '{}' and '{}' via {} (flush every {} message(s))",
            kafka.basket_topic, kafka.payment_topic, kafka.bootstrap_servers, kafka.flush_interval
        );
        sinks.push(Box::new(BrokerSink::new(
            pipeline,
            TopicRouting::from_settings(kafka),
        )));
    }

    if sinks.is_empty() {
        warn!("Neither writeToFile nor brokerEnabled is set, documents will be discarded");
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt signal, finishing current record");
            interrupt.cancel();
        }
    });

    let metrics = RunLoop::new(&catalog, &config, seed, sinks, cancel)
        .run()
        .await
        .context("Document generation failed")?;
    metrics.log_summary();

    Ok(())
}
