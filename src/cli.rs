//! Command line front end.
//!
//! Parameters come from, in increasing priority: built-in defaults, the
//! per-user config file, a `--config` file, then individual flags.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use surfacekit_camtools::{render_program, SurfacingGenerator, SurfacingParameters, ToolpathStats};
use surfacekit_settings::Config;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "surfacekit")]
#[command(version, about = "Generate CNC surfacing G-code", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a surfacing program
    Generate {
        /// Job configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file (default: output.path from the configuration)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Print the program to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
        #[command(flatten)]
        overrides: SurfacingOverrides,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Destination (.toml or .json)
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    ShowConfig {
        /// Job configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        overrides: SurfacingOverrides,
    },
}

/// Per-run overrides for individual surfacing parameters
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SurfacingOverrides {
    /// Bit diameter (mm)
    #[arg(long)]
    pub diameter: Option<f64>,
    /// Stepover as a percentage of the bit diameter
    #[arg(long)]
    pub stepover: Option<f64>,
    /// Cutting feed rate (mm/min)
    #[arg(long)]
    pub feed_rate: Option<f64>,
    /// Stock length along X (mm)
    #[arg(long)]
    pub length_x: Option<f64>,
    /// Stock length along Y (mm)
    #[arg(long)]
    pub length_y: Option<f64>,
    /// Clearance height for rapid moves (mm)
    #[arg(long)]
    pub safe_z: Option<f64>,
    /// Depth removed per pass (mm)
    #[arg(long)]
    pub depth_per_pass: Option<f64>,
    /// Total depth removed (mm)
    #[arg(long)]
    pub total_depth: Option<f64>,
    /// Spindle speed (RPM)
    #[arg(long)]
    pub spindle_speed: Option<f64>,
}

impl SurfacingOverrides {
    pub fn apply(&self, params: &mut SurfacingParameters) {
        let fields = [
            (self.diameter, &mut params.bit_diameter),
            (self.stepover, &mut params.stepover_percent),
            (self.feed_rate, &mut params.feed_rate),
            (self.length_x, &mut params.length_x),
            (self.length_y, &mut params.length_y),
            (self.safe_z, &mut params.safe_z),
            (self.depth_per_pass, &mut params.depth_per_pass),
            (self.total_depth, &mut params.total_depth),
            (self.spindle_speed, &mut params.spindle_speed),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Build the configuration for a run and validate it.
pub fn resolve_config(path: Option<&Path>, overrides: &SurfacingOverrides) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(default) if default.exists() => {
                debug!("Using config {}", default.display());
                Config::load_from_file(&default)
                    .with_context(|| format!("Failed to load config {}", default.display()))?
            }
            _ => Config::default(),
        },
    };

    overrides.apply(&mut config.surfacing);
    config.validate().context("Invalid surfacing configuration")?;
    Ok(config)
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Generate {
        config: None,
        output: None,
        stdout: false,
        overrides: SurfacingOverrides::default(),
    });

    match command {
        Commands::Generate {
            config,
            output,
            stdout,
            overrides,
        } => {
            let config = resolve_config(config.as_deref(), &overrides)?;
            let output = output.unwrap_or_else(|| config.output.path.clone());
            generate(&config, (!stdout).then_some(output.as_path()))
        }
        Commands::InitConfig { path, force } => init_config(&path, force),
        Commands::ShowConfig { config, overrides } => {
            let config = resolve_config(config.as_deref(), &overrides)?;
            let text = config
                .to_string_for_path(Path::new("effective.toml"))
                .context("Failed to serialize configuration")?;
            print!("{}", text);
            Ok(())
        }
    }
}

/// Generate the program for `config`, writing to `output` or stdout when `None`.
pub fn generate(config: &Config, output: Option<&Path>) -> Result<()> {
    let generator = SurfacingGenerator::new(config.effective_parameters());

    let lines = generator.toolpath().context("Failed to build toolpath")?;
    let stats = ToolpathStats::from_toolpath(&lines);
    info!(
        "{} commands, {:.0} mm cutting, {:.0} mm rapid, ~{:.1} min at feed",
        stats.commands, stats.feed_distance, stats.rapid_distance, stats.estimated_cut_minutes
    );
    let program = render_program(generator.params(), &lines);

    match output {
        Some(path) => {
            std::fs::write(path, &program)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote surfacing program to {}", path.display());
        }
        None => std::io::stdout()
            .lock()
            .write_all(program.as_bytes())
            .context("Failed to write program to stdout")?,
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save_to_file(path)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    info!("Wrote default configuration to {}", path.display());
    Ok(())
}
