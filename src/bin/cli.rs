//! live-draw CLI
//!
//! Local execution entry point. For AWS Lambda, use `live-draw-lambda`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use live_draw::{
    api::BiliLiveApi,
    error::Result,
    models::{Config, FollowList},
    pipeline,
    services::AreaDirectory,
};

/// live-draw - Lottery and red-packet sweeper for live rooms
#[derive(Parser, Debug)]
#[command(name = "live-draw", version, about = "Live room draw sweeper")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "live-draw.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join eligible lottery moments
    Lottery {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Join open red packets
    RedPacket {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Run both sweeps: Lottery → Red packet
    All {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the category tree
    Areas,

    /// Validate the configuration file
    Validate,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Pages to scan per sub-category (overrides config)
    #[arg(long)]
    pages: Option<u32>,

    /// Write the follow list as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(pages) = self.pages {
            config.lottery.pages = pages;
            config.red_packet.pages = pages;
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Print and optionally save the follow list.
async fn report_follows(follows: &FollowList, output: Option<&Path>) -> Result<()> {
    if follows.is_empty() {
        log::info!("No new streamers to follow");
    } else {
        log::info!("{} streamers to follow:", follows.len());
        for target in follows.as_slice() {
            log::info!("    {}", target);
        }
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(follows)?;
        tokio::fs::write(path, json).await?;
        log::info!("Follow list saved to {}", path.display());
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("live-draw starting...");

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env_overrides();

    match cli.command {
        Command::Lottery { run } => {
            run.apply(&mut config);
            config.validate()?;
            let api = BiliLiveApi::new(&config.http)?;
            let outcome = pipeline::run_lottery(&api, &config).await?;
            report_follows(&outcome.follows, run.output.as_deref()).await?;
        }

        Command::RedPacket { run } => {
            run.apply(&mut config);
            config.validate()?;
            let api = BiliLiveApi::new(&config.http)?;
            let outcome = pipeline::run_red_packet(&api, &config).await?;
            report_follows(&outcome.follows, run.output.as_deref()).await?;
        }

        Command::All { run } => {
            run.apply(&mut config);
            config.validate()?;
            let api = BiliLiveApi::new(&config.http)?;
            let outcome = pipeline::run_all(&api, &config).await?;
            log::info!(
                "Joined {} lottery moments and {} red packets",
                outcome.lottery.joined,
                outcome.red_packet.joined
            );
            report_follows(&outcome.follows, run.output.as_deref()).await?;
        }

        Command::Areas => {
            let api = BiliLiveApi::new(&config.http)?;
            let groups = AreaDirectory::new(&api).fetch().await?;
            for group in &groups {
                log::info!("{} ({}): {} sub-categories", group.name, group.id, group.areas.len());
                for area in &group.areas {
                    log::info!("    {} ({}/{})", area.name, area.parent_id, area.area_id);
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!("    Lottery pages: {}", config.lottery.pages);
            log::info!("    Red packet pages: {}", config.red_packet.pages);
            log::info!("    Blacklisted streamers: {}", config.lottery.blacklist.len());
            log::info!(
                "    Award patterns: {} include, {} exclude",
                config.lottery.include_patterns.len(),
                config.lottery.exclude_patterns.len()
            );
            if config.http.cookie.is_empty() {
                log::warn!("http.cookie is empty; joins will be rejected");
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
