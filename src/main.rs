use anyhow::Context;
use clap::{Parser, Subcommand};
use honeyplot::{config::Config, pipeline, SvgRenderer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "honeyplot", about = "Normalise Cowrie honeypot logs and chart attack statistics")]
struct Cli {
    /// Config file (TOML). Defaults to ./honeyplot.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalise a raw newline-delimited log into the clean document.
    Clean {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render charts from the clean document.
    Plot {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Clean, then plot.
    Run {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        clean: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the computed views as JSON instead of rendering them.
    Report {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let paths = &mut cfg.paths;

    match cli.command {
        Command::Clean { input, output } => {
            override_path(&mut paths.raw_log, input);
            override_path(&mut paths.clean_log, output);
            println!("{}", pipeline::clean(&paths.raw_log, &paths.clean_log)?);
        }
        Command::Plot { input, output_dir } => {
            override_path(&mut paths.clean_log, input);
            override_path(&mut paths.output_dir, output_dir);
            plot(&paths.clean_log, &paths.output_dir)?;
        }
        Command::Run {
            input,
            clean,
            output_dir,
        } => {
            override_path(&mut paths.raw_log, input);
            override_path(&mut paths.clean_log, clean);
            override_path(&mut paths.output_dir, output_dir);
            println!("{}", pipeline::clean(&paths.raw_log, &paths.clean_log)?);
            plot(&paths.clean_log, &paths.output_dir)?;
        }
        Command::Report { input } => {
            override_path(&mut paths.clean_log, input);
            let charts = pipeline::report(&paths.clean_log)?;
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }
    }

    Ok(())
}

fn override_path(slot: &mut PathBuf, value: Option<PathBuf>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn plot(clean: &std::path::Path, output_dir: &std::path::Path) -> anyhow::Result<()> {
    let mut renderer = SvgRenderer::new(output_dir)?;
    pipeline::plot(clean, &mut renderer)?;
    println!("Plots saved in the '{}' folder.", output_dir.display());
    Ok(())
}
