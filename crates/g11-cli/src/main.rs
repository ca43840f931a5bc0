use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "g11")]
#[command(about = "Declarative map widget tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two nearby-points payloads by point id
    Diff {
        /// Previously rendered payload (JSON file)
        #[arg(long)]
        old: String,

        /// Freshly fetched payload (JSON file)
        #[arg(long)]
        new: String,

        /// Do not sort by id first; reject inputs that are not strictly ascending
        #[arg(long, default_value_t = false)]
        assume_sorted: bool,
    },

    /// Parse a data-options attribute and print the typed options
    Options {
        /// Raw attribute, e.g. "lat=59.9;lon=30.3;zoom=11"
        raw: String,

        /// Layered config paths in merge order (default zoom source)
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Find map elements in a JSON list of element descriptors
    Discover {
        /// JSON file: [{"id": ..., "class_list": [...], "data_options": ...}]
        #[arg(long)]
        elements: String,

        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Fetch points near a coordinate once and print them
    Near {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Overrides endpoint.base_url from config
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Diff {
            old,
            new,
            assume_sorted,
        } => commands::diff::run(&old, &new, assume_sorted),

        Commands::Options { raw, config_paths } => {
            let cfg = commands::load_client_config(&config_paths)?;
            let opts = g11_config::options::parse_data_options_with(&raw, cfg.map.default_zoom);
            println!("{}", serde_json::to_string_pretty(&opts)?);
            Ok(())
        }

        Commands::Discover {
            elements,
            config_paths,
        } => {
            let cfg = commands::load_client_config(&config_paths)?;
            commands::discover(&elements, &cfg)
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = g11_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(())
        }

        Commands::Near {
            lat,
            lng,
            base_url,
            config_paths,
        } => {
            let mut cfg = commands::load_client_config(&config_paths)?;
            if let Some(url) = base_url {
                cfg.endpoint.base_url = url;
            }
            commands::near::run(&cfg, g11_schemas::LatLng::new(lat, lng)).await
        }
    }
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
