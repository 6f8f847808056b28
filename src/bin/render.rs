use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use embed_timer::config::{decode, RenderConfig};
use embed_timer::display::{DisplaySink, JsonLinesSink, TerminalSink};
use embed_timer::errors::TimerError;
use embed_timer::render;
use embed_timer::time::SystemClock;
use tracing::{debug, info};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "timer-render",
    version,
    about = "Render a live countdown from its configuration URL"
)]
struct Cli {
    /// The configuration URL produced by timer-build.
    url: String,

    /// Emit one JSON object per tick instead of a terminal display.
    #[arg(long)]
    json: bool,

    /// Paint a single frame and exit instead of looping.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err:#}");
        if let Some(hint) = err.downcast_ref::<TimerError>().and_then(TimerError::hint) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let url = Url::parse(&cli.url).context("configuration URL is not a valid URL")?;
    let config = decode(&url)?;

    info!(
        language = %config.language,
        target_time = %config.target_time,
        "decoded timer configuration"
    );
    if let Some(styling) = &config.styling {
        // Stylesheets only mean something to a page-based host.
        debug!("ignoring {} bytes of styling on this host", styling.len());
    }

    let clock = SystemClock;

    if cli.once {
        let model = render::render_frame(&config, &clock)?;
        if cli.json {
            JsonLinesSink::new(io::stdout()).present(&model)?;
        } else {
            TerminalSink::new(io::stdout()).present(&model)?;
            println!();
        }
        return Ok(());
    }

    let render_config = RenderConfig::default();
    if cli.json {
        render::run(config, clock, JsonLinesSink::new(io::stdout()), render_config).await?;
    } else {
        render::run(config, clock, TerminalSink::new(io::stdout()), render_config).await?;
    }

    Ok(())
}
