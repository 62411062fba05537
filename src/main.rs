#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use registrar_core::query_log::DEFAULT_CAPACITY;
use registrar_core::{ConsoleConfig, QueryLogConfig};

/// Console settings, set from command line
static CONSOLE_CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

/// Whether to load sample records on startup
static SEED_DEMO: OnceLock<bool> = OnceLock::new();

/// Get the console configuration (set from command line or default)
pub fn get_console_config() -> ConsoleConfig {
    CONSOLE_CONFIG.get().cloned().unwrap_or_else(|| {
        ConsoleConfig::default().with_data_dir(default_data_dir())
    })
}

/// Whether sample records should be loaded into an empty console
pub fn get_seed_demo() -> bool {
    SEED_DEMO.get().copied().unwrap_or(false)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("registrar")
}

/// Registrar - student and course administration
#[derive(Parser, Debug)]
#[command(name = "registrar-desktop")]
#[command(about = "Registrar - student and course administration with a SQL debugger")]
struct Args {
    /// Data directory for record storage
    #[arg(short, long, env = "REGISTRAR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long)]
    in_memory: bool,

    /// Load sample records if the console is empty
    #[arg(long)]
    demo: bool,

    /// Number of query log entries kept
    #[arg(long, env = "REGISTRAR_LOG_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    log_capacity: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ConsoleConfig::default()
        .with_query_log(QueryLogConfig::default().with_capacity(args.log_capacity));
    let location = if args.in_memory {
        "memory".to_string()
    } else {
        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        let shown = data_dir.display().to_string();
        config = config.with_data_dir(data_dir);
        shown
    };

    let _ = CONSOLE_CONFIG.set(config);
    let _ = SEED_DEMO.set(args.demo);

    tracing::info!("Starting Registrar with records in {}", location);

    let desktop = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Registrar")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 850.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .launch(app::App);
}
