use clap::{Args, Parser, Subcommand};
use pkg_client::DynatraceClient;
use pkg_constants::api::{ENV_API_TOKEN, ENV_BASE_URL};
use pkg_constants::paths::DEFAULT_CONFIG_FILE;
use pkg_converter::MonitorTemplate;
use pkg_migrate::files::ensure_work_dir;
use pkg_migrate::{ExtractRequest, ExtractSummary, extract_monitors, upload_monitors};
use pkg_types::config::{ConverterConfig, ConverterConfigFile, load_config_file};
use pkg_types::kind::ExtensionKind;
use pkg_types::validate::validate_frequency;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nam-migrate",
    about = "Migrate third-party synthetic extension endpoints to NAM monitors"
)]
struct Cli {
    /// Path to YAML file with converter tunables
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

/// Tenant connection settings shared by both commands.
#[derive(Args)]
struct ApiArgs {
    /// Tenant base URL
    #[arg(long, env = ENV_BASE_URL)]
    dt_url: String,

    /// API token
    #[arg(long, env = ENV_API_TOKEN, hide_env_values = true)]
    dt_token: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert extension endpoints into NAM monitor definition files
    Get {
        #[command(flatten)]
        api: ApiArgs,

        /// Synthetic location ids the monitors run from
        #[arg(required = true, num_args = 1..)]
        locations: Vec<String>,

        /// Directory to write monitor configuration
        work_dir: PathBuf,

        /// Extension to migrate (dns, ping or port); all three when omitted
        #[arg(long, value_name = "TYPE")]
        extension_type: Option<ExtensionKind>,

        /// Enable imported monitors
        #[arg(long)]
        enabled: bool,

        /// Time between monitor executions in minutes (1, 2, 5, 10, 15, 30, 60)
        #[arg(long, value_parser = validate_frequency)]
        frequency_min: Option<String>,

        /// Monitor template replacing the built-in one
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Upload monitor definition files and record the created ids
    Post {
        #[command(flatten)]
        api: ApiArgs,

        /// Directory to load monitor configuration and write monitor ids
        work_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: ConverterConfigFile = load_config_file(&cli.config)?;

    match cli.command {
        Commands::Get {
            api,
            locations,
            work_dir,
            extension_type,
            enabled,
            frequency_min,
            template,
        } => {
            ensure_work_dir(&work_dir)?;

            let template = match template {
                Some(path) => MonitorTemplate::load(&path)?,
                None => MonitorTemplate::builtin()?,
            };
            // Merge: CLI args > config file > defaults
            let config = ConverterConfig::from_file(file_cfg).with_overrides(enabled, frequency_min);
            let kinds = match extension_type {
                Some(kind) => vec![kind],
                None => ExtensionKind::ALL.to_vec(),
            };

            info!("Migrating {:?} endpoint(s) from {}", kinds, api.dt_url);
            info!("  Locations: {}", locations.join(", "));
            info!("  Work dir:  {}", work_dir.display());

            let client = DynatraceClient::new(&api.dt_url, &api.dt_token)?;
            let request = ExtractRequest {
                kinds: &kinds,
                locations: &locations,
                work_dir: &work_dir,
                config: &config,
                template: &template,
            };
            let outcomes = extract_monitors(&client, &request);

            let summary = ExtractSummary::from_outcomes(&outcomes);
            info!(
                "Done: {} saved, {} skipped, {} failed",
                summary.saved, summary.skipped, summary.failed
            );
        }
        Commands::Post { api, work_dir } => {
            info!("Uploading monitors from '{}' to {}", work_dir.display(), api.dt_url);
            let client = DynatraceClient::new(&api.dt_url, &api.dt_token)?;
            let report = upload_monitors(&client, &work_dir)?;

            let created = report.created_ids().len();
            if report.failed() > 0 {
                warn!("{} monitor(s) created, {} failed", created, report.failed());
            } else {
                info!("{} monitor(s) created", created);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn get_takes_locations_then_work_dir() {
        let cli = parse(&[
            "nam-migrate", "get", "--dt-url", "https://t", "--dt-token", "x",
            "LOC-1", "LOC-2", "out",
        ])
        .unwrap();
        let Commands::Get { locations, work_dir, extension_type, enabled, frequency_min, .. } =
            cli.command
        else {
            panic!("expected get");
        };
        assert_eq!(locations, vec!["LOC-1", "LOC-2"]);
        assert_eq!(work_dir, PathBuf::from("out"));
        assert_eq!(extension_type, None);
        assert!(!enabled);
        assert_eq!(frequency_min, None);
    }

    #[test]
    fn get_options() {
        let cli = parse(&[
            "nam-migrate", "get", "--dt-url", "https://t", "--dt-token", "x",
            "--extension-type", "port", "--enabled", "--frequency-min", "15", "LOC-1", "out",
        ])
        .unwrap();
        let Commands::Get { extension_type, enabled, frequency_min, .. } = cli.command else {
            panic!("expected get");
        };
        assert_eq!(extension_type, Some(ExtensionKind::Port));
        assert!(enabled);
        assert_eq!(frequency_min.as_deref(), Some("15"));
    }

    #[test]
    fn invalid_frequency_is_rejected() {
        let res = parse(&[
            "nam-migrate", "get", "--dt-url", "https://t", "--dt-token", "x",
            "--frequency-min", "7", "LOC-1", "out",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_extension_type_is_rejected() {
        let res = parse(&[
            "nam-migrate", "get", "--dt-url", "https://t", "--dt-token", "x",
            "--extension-type", "http", "LOC-1", "out",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn post_takes_work_dir() {
        let cli = parse(&["nam-migrate", "post", "--dt-url", "https://t", "--dt-token", "x", "out"])
            .unwrap();
        let Commands::Post { api, work_dir } = cli.command else {
            panic!("expected post");
        };
        assert_eq!(api.dt_url, "https://t");
        assert_eq!(work_dir, PathBuf::from("out"));
    }
}
