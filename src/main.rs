use clap::Parser;
use kafka_relay::{Config, Error, Relay};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "kafka-relay")]
#[command(about = "Kafka topic-to-topic relay that trims record values", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    info!("Starting kafka-relay");

    let config = if args.config.exists() {
        info!("Loading configuration from {:?}", args.config);
        match Config::from_file(&args.config) {
            Ok(cfg) => {
                info!("Configuration loaded successfully");
                cfg
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                return Err(e);
            }
        }
    } else {
        info!(
            "No configuration file at {:?}, using built-in defaults",
            args.config
        );
        Config::default()
    };

    info!(
        kafka_brokers = ?config.kafka.brokers,
        group_id = %config.kafka.group_id,
        input_topic = %config.relay.input_topic,
        output_topic = %config.relay.output_topic,
        delivery = ?config.relay.delivery,
        "Configuration summary"
    );

    let (mut relay, shutdown) = Relay::new(config)?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, requesting shutdown");
            shutdown.shutdown();
        }
    });

    match relay.run().await {
        Err(Error::Shutdown) => {
            info!("Relay stopped cleanly");
            Ok(())
        }
        Err(e) => {
            error!("Relay failed: {}", e);
            Err(e)
        }
        Ok(()) => Ok(()),
    }
}

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("kafka_relay=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kafka_relay=info,warn"))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
