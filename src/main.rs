use clap::{Parser, Subcommand};
use eframe::{egui, NativeOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cerebro_dashboard::config::{self, SimulationConfig};
use cerebro_dashboard::dashboard::CerebroApp;
use cerebro_dashboard::{
    build_report, CerebroError, CommunityStore, EventBridge, JsonFileStorage, T12Event,
};

const BRIDGE_MODULE: &str = "cerebro";

#[derive(Parser, Debug)]
#[command(name = "cerebro-dashboard", version, about = "Community & impact dashboard")]
struct Cli {
    /// Path to the TOML config file. Missing file means defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides the state file derived from the config.
    #[arg(long)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the GUI dashboard (default).
    Dashboard,
    /// Print every derived metric for the persisted state as JSON.
    Report,
    /// Add study time to a concept.
    Track { concept: String, seconds: f64 },
    /// Mark a track as completed.
    Complete { track_id: String },
    /// Publish an NPS_SUBMITTED event through the bridge.
    Nps {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Publish a raw `{ "type": ..., "payload": ... }` event through the bridge.
    Event { json: String },
    /// Drop the persisted state and go back to the defaults.
    Reset,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(store: &CommunityStore) -> Result<(), CerebroError> {
    let report = build_report(store.state());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn publish_and_deliver(
    bridge: &EventBridge,
    store: &mut CommunityStore,
    event: T12Event,
) -> Result<(), CerebroError> {
    bridge.publisher().publish(event)?;
    let delivered = bridge.deliver_pending(store);
    info!("Delivered {} event(s)", delivered);
    Ok(())
}

fn run_dashboard(
    store: CommunityStore,
    bridge: EventBridge,
    simulation: SimulationConfig,
) -> Result<(), CerebroError> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Cerebro Evolutivo - Community Dashboard",
        options,
        Box::new(move |_cc| Box::new(CerebroApp::new(store, bridge, simulation))),
    )
    .map_err(|e| CerebroError::Other(format!("dashboard failed: {}", e)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config_from_file(&cli.config)?;
    init_tracing(&config.log_filter);

    let state_file = cli.state.clone().unwrap_or_else(|| config.state_file());
    info!("Using state file {}", state_file.display());
    let mut store = CommunityStore::open(Box::new(JsonFileStorage::new(state_file)));
    let bridge = EventBridge::new(BRIDGE_MODULE);

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(store, bridge, config.simulation)?,
        Command::Report => print_report(&store)?,
        Command::Track { concept, seconds } => {
            store.track_progress(&concept, seconds);
            print_report(&store)?;
        }
        Command::Complete { track_id } => {
            store.complete_track(&track_id);
            print_report(&store)?;
        }
        Command::Nps { score } => {
            publish_and_deliver(&bridge, &mut store, T12Event::nps_submitted(score))?;
            println!(
                "evolutionIndex = {}",
                store.community_metrics().evolution_index
            );
        }
        Command::Event { json } => {
            let event = T12Event::from_json(&json)?;
            publish_and_deliver(&bridge, &mut store, event)?;
            println!(
                "evolutionIndex = {}",
                store.community_metrics().evolution_index
            );
        }
        Command::Reset => {
            store.reset();
            println!("State reset to defaults");
        }
    }
    Ok(())
}
