//! xpboard - Learner dashboard charts from saved GraphQL responses

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xpboard_core::{
    compute_summary, load_dataset, recent_transactions, spawn_resize_listener, DashboardConfig,
    DataSource, DrawingSurface, FileSource, RenderCoordinator, SvgSurface,
};
use xpboard_types::ChartViewports;

use cli::SceneSurface;

#[derive(Parser)]
#[command(
    name = "xpboard",
    version,
    about = "Learner dashboard charts",
    long_about = "Renders the XP-by-project and skill-level bar charts, plus a profile summary,\n\
                  from a saved GraphQL response.\n\
                  \n\
                  Examples:\n\
                    xpboard render response.json                 # SVG charts into ./charts\n\
                    xpboard render response.json --format json   # Scene descriptions as JSON\n\
                    xpboard render response.json --resize 800x420 --resize 640x380\n\
                    xpboard summary response.json                # Summary + recent transactions\n\
                    xpboard config                               # Print effective configuration\n\
                  \n\
                  Environment Variables:\n\
                    XPBOARD_CONFIG                   # Override config file path\n\
                    XPBOARD_LOG                      # Log filter (falls back to RUST_LOG)\n\
                    XPBOARD_NO_COLOR                 # Disable ANSI colors in tables"
)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Path to config file (default: <config dir>/xpboard/config.toml)
    #[arg(long, env = "XPBOARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "XPBOARD_NO_COLOR", global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Render both charts from a saved response
    Render {
        /// GraphQL response file
        input: PathBuf,
        /// Output directory
        #[arg(long, short = 'o', default_value = "charts")]
        out_dir: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
        /// Replay a viewport resize (WIDTHxHEIGHT, applied to both charts);
        /// repeated values are debounced like a live resize burst
        #[arg(long, value_parser = parse_size)]
        resize: Vec<(f64, f64)>,
    },
    /// Print profile summary and recent transactions
    Summary {
        /// GraphQL response file
        input: PathBuf,
        /// Number of recent transactions (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    match cli.mode {
        Mode::Render {
            input,
            out_dir,
            format,
            resize,
        } => {
            run_render(&config, input, out_dir, format, resize).await?;
        }
        Mode::Summary { input, limit, json } => {
            run_summary(&config, input, limit, json, cli.no_color).await?;
        }
        Mode::Config => {
            let rendered =
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for JSON output
fn init_tracing() {
    let filter = EnvFilter::try_from_env("XPBOARD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match DashboardConfig::default_path() {
            Some(path) => path,
            None => {
                tracing::debug!("No config directory on this platform, using defaults");
                return Ok(DashboardConfig::default());
            }
        },
    };

    DashboardConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: f64 = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", w))?;
    let height: f64 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", h))?;
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(format!("size must be non-negative, got '{}'", s));
    }
    Ok((width, height))
}

async fn run_render(
    config: &DashboardConfig,
    input: PathBuf,
    out_dir: PathBuf,
    format: OutputFormat,
    resize: Vec<(f64, f64)>,
) -> Result<()> {
    let written = match format {
        OutputFormat::Svg => {
            let surface = render_with(config, SvgSurface::new(), &input, &resize).await?;
            surface.write_all(&out_dir)?
        }
        OutputFormat::Json => {
            let surface = render_with(config, SceneSurface::default(), &input, &resize).await?;
            surface.write_all(&out_dir)?
        }
    };

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Load `input`, replay resizes through the debouncer, hand back the surface
async fn render_with<S>(
    config: &DashboardConfig,
    surface: S,
    input: &Path,
    resize: &[(f64, f64)],
) -> Result<S>
where
    S: DrawingSurface + Send + 'static,
{
    let coordinator = Arc::new(Mutex::new(RenderCoordinator::from_config(surface, config)));

    load_dataset(&*coordinator, &FileSource::new(input))
        .await
        .with_context(|| format!("Failed to load response from {}", input.display()))?;

    if !resize.is_empty() {
        let quiet = config.resize_debounce();
        let (tx, rx) = mpsc::channel(resize.len());
        let listener = spawn_resize_listener(Arc::clone(&coordinator), rx, quiet);

        let base = config.viewports;
        for &(width, height) in resize {
            let viewports = ChartViewports {
                xp: base.xp.resized(width, height),
                skills: base.skills.resized(width, height),
            };
            tx.send(viewports)
                .await
                .context("Resize listener stopped early")?;
        }

        // Closing the channel applies whatever resize is still pending
        drop(tx);
        listener.await.context("Resize listener panicked")?;
    }

    let coordinator = Arc::try_unwrap(coordinator)
        .map_err(|_| anyhow::anyhow!("Coordinator still shared after rendering"))?;
    Ok(coordinator.into_inner().into_surface())
}

async fn run_summary(
    config: &DashboardConfig,
    input: PathBuf,
    limit: Option<usize>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let dataset = FileSource::new(&input)
        .fetch()
        .await
        .with_context(|| format!("Failed to load response from {}", input.display()))?;

    let summary = compute_summary(&dataset, config.total_xp);
    let rows = recent_transactions(&dataset, limit.unwrap_or(config.recent_limit));

    println!("{}", cli::format_summary(&summary, &rows, json, no_color));
    Ok(())
}
