use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use tierlab_adapter_catalog::CatalogBackend;
use tierlab_application::{Evaluator, linspace, sweep};
use tierlab_domain::{ComponentId, Knob, parse_assignment};
use tierlab_ui_presentation::live_values;

use crate::logging;
use crate::report::{
    EvaluationReport, InfoReport, OutputFormat, SweepReport, render_knobs, render_presets,
};
use crate::session::{ConfigSource, config_path_from_env, start_session};

#[derive(Debug, Parser)]
#[command(
    name = "tierlab",
    version,
    about = "Capacity, latency and cost model for a three-tier web service"
)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the configuration presets.
    Presets {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Evaluate a configuration and print metrics, diagram and recommendations.
    Evaluate {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Evaluate one knob across an evenly spaced range.
    Sweep {
        #[arg(long, value_parser = parse_knob)]
        knob: Knob,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 20)]
        steps: usize,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Describe a diagram node or control section, with live values.
    Info {
        /// e.g. db, cache, traffic_section
        component: String,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List tunable knobs and their ranges.
    Knobs,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Preset key to start from.
    #[arg(long)]
    preset: Option<String>,
    /// YAML or JSON configuration file (defaults to $TIERLAB_CONFIG_PATH).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override a knob, e.g. --set rps=900 --set cache_enabled=off.
    #[arg(long = "set", value_name = "KNOB=VALUE", value_parser = parse_override)]
    overrides: Vec<(Knob, f64)>,
}

impl SourceArgs {
    fn into_source(self) -> ConfigSource {
        ConfigSource {
            preset: self.preset,
            config_path: self.config,
            overrides: self.overrides,
        }
        .with_env_fallback(config_path_from_env())
    }
}

fn parse_knob(raw: &str) -> Result<Knob, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}

fn parse_override(raw: &str) -> Result<(Knob, f64), String> {
    parse_assignment(raw).map_err(|err| err.to_string())
}

pub fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let backend = CatalogBackend::from_env()?;
    debug!(
        presets = ?backend.presets_path,
        pricing = ?backend.pricing_path,
        "catalogue ready"
    );
    let ports = backend.ports();

    let output = match cli.command {
        Command::Presets { format } => render_presets(&ports.presets.presets(), format)?,
        Command::Evaluate { source, format } => {
            let runtime = start_session(ports, &source.into_source())?;
            EvaluationReport::from_runtime(&runtime).render(format)?
        }
        Command::Sweep {
            knob,
            from,
            to,
            steps,
            source,
            format,
        } => {
            if steps == 0 {
                bail!("--steps must be at least 1");
            }
            let evaluator = Evaluator::new(ports.pricing.cost_table());
            let runtime = start_session(ports, &source.into_source())?;
            let points = sweep(&evaluator, runtime.config(), knob, &linspace(from, to, steps));
            SweepReport::new(knob, points).render(format)?
        }
        Command::Info {
            component,
            source,
            format,
        } => {
            let id: ComponentId = component.parse()?;
            let info = ports
                .info
                .info(id)
                .with_context(|| format!("No reference entry for {id}"))?;
            let runtime = start_session(ports, &source.into_source())?;
            InfoReport {
                info,
                live: live_values(id, runtime.result(), runtime.config()),
            }
            .render(format)?
        }
        Command::Knobs => render_knobs(),
    };

    print!("{output}");
    Ok(())
}
