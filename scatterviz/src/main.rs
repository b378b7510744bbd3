// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `scatterviz` command-line front-end.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use scatterviz::{
    CONFIG_FILE, Command, Config, Dataset, Event, Host, Outcome, Reply, Session, XField, YField,
    failure_svg,
};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scatterviz", version)]
#[command(about = "Interactive team-statistics scatter plot rendered to SVG")]
struct Cli {
    /// Config file. Defaults to `scatterviz.toml` in the working directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// CSV file to load, overriding the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Rebuild at the new size on resize instead of keeping the fixed canvas.
    #[arg(long, global = true)]
    responsive: bool,
    /// Log verbosity. `RUST_LOG` directives take precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the data, apply a selection and write one SVG frame.
    Render {
        /// X field, e.g. `passing_touchdowns`.
        #[arg(long)]
        x: Option<XField>,
        /// Y field, e.g. `total_touchdowns`.
        #[arg(long)]
        y: Option<YField>,
        /// Time after the selection at which to sample the frame.
        #[arg(long, default_value_t = 1000)]
        at_ms: u64,
        /// Output SVG path.
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Run a command stream from a script or stdin.
    Session {
        /// Script file; stdin when absent.
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::from(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None if Path::new(CONFIG_FILE).exists() => {
            Config::load(CONFIG_FILE).with_context(|| format!("loading {CONFIG_FILE}"))?
        }
        None => Config::default(),
    };
    if let Some(data) = &cli.data {
        config.data.clone_from(data);
    }
    if cli.responsive {
        config.responsive = true;
    }
    Ok(config)
}

/// Loads the dataset and mounts it. A load failure writes the failure SVG to `failure_out`.
fn mount(config: Config, failure_out: Option<&Path>) -> Result<Host> {
    let dataset = match Dataset::from_path(&config.data) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!(path = %config.data.display(), %err, "failed to load data");
            if let Some(out) = failure_out {
                fs::write(out, failure_svg(&format!("Failed to load data: {err}")))
                    .with_context(|| format!("writing {}", out.display()))?;
            }
            return Err(err).with_context(|| format!("loading {}", config.data.display()));
        }
    };
    let mut host = Host::new(config.container.clone(), config);
    host.mount(dataset, Duration::ZERO)
        .context("building the chart")?;
    Ok(host)
}

fn render(
    config: Config,
    x: Option<XField>,
    y: Option<YField>,
    at_ms: u64,
    out: &Path,
) -> Result<()> {
    let mut host = mount(config, Some(out))?;
    for event in [x.map(Event::ClickXLabel), y.map(Event::ClickYLabel)]
        .into_iter()
        .flatten()
    {
        if host.dispatch(event, Duration::ZERO) == Outcome::Unchanged {
            info!(?event, "selection already active");
        }
    }
    let Some(svg) = host.snapshot(Duration::from_millis(at_ms)) else {
        bail!("no chart mounted");
    };
    fs::write(out, svg).with_context(|| format!("writing {}", out.display()))?;
    info!(path = %out.display(), at_ms, "wrote frame");
    Ok(())
}

fn session(config: Config, script: Option<&Path>) -> Result<()> {
    let host = mount(config, None)?;
    let mut session = Session::new(host);
    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    for (n, line) in input.lines().enumerate() {
        let line = line.context("reading commands")?;
        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = n + 1, %err, "skipping command");
                continue;
            }
        };
        match session
            .apply(command)
            .with_context(|| format!("line {}", n + 1))?
        {
            Reply::State(state) => println!("{state}"),
            Reply::Dispatched(Outcome::Reselected { axis, diffs }) => {
                println!("reselected {axis} ({} changes)", diffs.len());
            }
            Reply::Dispatched(Outcome::TooltipShown) => {
                if let Some(popup) = session.host().chart().and_then(|c| c.popup()) {
                    println!("popup {}", popup.html);
                }
            }
            Reply::Dispatched(Outcome::TooltipHidden) => println!("popup hidden"),
            Reply::Dispatched(Outcome::Unchanged) => println!("unchanged"),
            Reply::Advanced(now) => println!("t={}ms", now.as_millis()),
            Reply::Resized => println!("rebuilt"),
            Reply::Written(path) => println!("wrote {}", path.display()),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let config = load_config(&cli)?;
    match cli.command {
        Commands::Render { x, y, at_ms, out } => render(config, x, y, at_ms, &out),
        Commands::Session { script } => session(config, script.as_deref()),
    }
}
