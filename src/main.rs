use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{LevelFilter, debug, info};

use confgen::{config, pipeline, render};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(name = "confgen")]
#[command(about = "Class model to configuration generator", long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate config.xml, meta.json, delta.json and the patched configuration.
    Generate {
        #[arg(long)]
        input_dir: Option<PathBuf>,

        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Compute the delta between two flat configuration documents.
    Diff {
        base: PathBuf,

        patched: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Apply a delta document to a flat configuration document.
    Patch {
        base: PathBuf,

        delta: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            cli.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    let mut app_config = config::load_config(cli.config.as_ref())?;

    match cli.cmd {
        Commands::Generate {
            input_dir,
            output_dir,
        } => {
            if let Some(dir) = input_dir {
                app_config.input_dir = dir;
            }
            if let Some(dir) = output_dir {
                app_config.output_dir = dir;
            }

            let written = pipeline::run(&app_config).context("generation failed")?;
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Diff { base, patched, out } => {
            let delta = pipeline::diff_files(&base, &patched)
                .with_context(|| format!("diff {} {}", base.display(), patched.display()))?;
            let json = render::to_json_pretty(&delta, app_config.format.json_indent, "delta")?;
            emit(out, &json)?;
        }
        Commands::Patch { base, delta, out } => {
            let patched = pipeline::patch_files(&base, &delta)
                .with_context(|| format!("patch {} with {}", base.display(), delta.display()))?;
            let json = render::to_json_pretty(
                &patched,
                app_config.format.json_indent,
                "patched configuration",
            )?;
            emit(out, &json)?;
        }
    }

    info!("Completed successfully");
    Ok(())
}

fn emit(out: Option<PathBuf>, contents: &str) -> Result<()> {
    match out {
        Some(path) => {
            pipeline::write_file(&path, contents)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", contents),
    }
    Ok(())
}
