use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::Path;
use subfix::align::AlignConfig;
use subfix::cli::{Cli, Commands, ConfigAction};
use subfix::config::{Config, default_config_path};
use subfix::refine::{Dispatcher, OpenRouterRefiner, PassthroughRefiner, Refiner};
use subfix::transcript::{RefineReport, Video};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Refine {
            input,
            output,
            model,
            chunk_size,
            dry_run,
            report,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(model) = model {
                config.llm.model = model;
            }
            if let Some(chunk_size) = chunk_size
                && chunk_size > 0
            {
                config.refine.max_segments_per_chunk = chunk_size;
            }
            run_refine(
                &config,
                &input,
                output.as_deref(),
                dry_run,
                report,
                cli.quiet,
            )
            .await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string(&config)?);
            }
            ConfigAction::Path => match cli.config.or_else(default_config_path) {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("could not determine a configuration directory"),
            },
        },
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Config::default(),
        },
    };
    Ok(config.with_env_overrides())
}

async fn run_refine(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    dry_run: bool,
    report: bool,
    quiet: bool,
) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let video = Video::from_json(&json)?;
    let originals = video.segments().to_vec();
    if originals.is_empty() {
        anyhow::bail!("transcript has no segments");
    }

    let refiner: Box<dyn Refiner> = if dry_run {
        Box::new(PassthroughRefiner)
    } else {
        Box::new(
            OpenRouterRefiner::from_env(config.llm.model.clone())?
                .with_base_url(config.llm.base_url.clone()),
        )
    };

    let dispatcher = Dispatcher::with_config(
        config.refine.max_segments_per_chunk,
        AlignConfig::default(),
    );

    if !quiet {
        let chunks = originals
            .len()
            .div_ceil(config.refine.max_segments_per_chunk);
        eprintln!(
            "Refining {} segments in {} chunk(s) via {}...",
            originals.len().bold(),
            chunks,
            refiner.name()
        );
    }

    let outcome = dispatcher.refine_video(refiner.as_ref(), &video).await;
    if !outcome.refined && !quiet {
        eprintln!("{}", "Refinement abandoned; output keeps the original text.".yellow());
    }

    let serialized = serde_json::to_string_pretty(&outcome.segments)?;
    match output {
        Some(path) => {
            std::fs::write(path, serialized)
                .with_context(|| format!("writing {}", path.display()))?;
            if !quiet {
                eprintln!("{} {}", "Wrote".green(), path.display());
            }
        }
        None => println!("{}", serialized),
    }

    if report {
        print_report(&RefineReport::compare(&originals, &outcome.segments));
    }

    Ok(())
}

fn print_report(report: &RefineReport) {
    eprintln!("Segments compared:    {}", report.total);
    eprintln!("Text changed:         {}", report.changed);
    let timestamps = format!("{}/{}", report.timestamps_preserved, report.total);
    if report.all_timestamps_preserved() {
        eprintln!("Timestamps preserved: {}", timestamps.green());
    } else {
        eprintln!("Timestamps preserved: {}", timestamps.red());
    }
    eprintln!("Avg length change:    {:+.1} chars", report.avg_length_delta);
    eprintln!("Max length change:    {} chars", report.max_length_delta);
}
