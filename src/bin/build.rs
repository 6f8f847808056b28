use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use embed_timer::builder::{build_embed, build_url, parse_duration, preset_text, TimerKind};
use embed_timer::errors::TimerError;
use embed_timer::messages::get_message;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTimerKind {
    Generic,
    Deletion,
    Translation,
    Ban,
}

impl From<CliTimerKind> for TimerKind {
    fn from(value: CliTimerKind) -> Self {
        match value {
            CliTimerKind::Generic => TimerKind::Generic,
            CliTimerKind::Deletion => TimerKind::Deletion,
            CliTimerKind::Translation => TimerKind::Translation,
            CliTimerKind::Ban => TimerKind::Ban,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "timer-build",
    version,
    about = "Build a shareable countdown timer URL and embeddable markup"
)]
struct Cli {
    /// Language code for timer labels.
    #[arg(long, default_value = "en")]
    lang: String,

    /// Timer start as an RFC 3339 instant; defaults to now.
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// How long the timer runs, e.g. "45m", "36h", "1d", "2w", "6mo", "1y".
    #[arg(long)]
    duration: String,

    /// Timer type; prefills messages and the output template.
    #[arg(long, value_enum, default_value_t = CliTimerKind::Generic)]
    kind: CliTimerKind,

    /// Override for the counting-down message.
    #[arg(long)]
    progress: Option<String>,

    /// Override for the after-expiry message.
    #[arg(long)]
    finished: Option<String>,

    /// Extra stylesheet text for the rendering page.
    #[arg(long)]
    style: Option<String>,

    /// Embed width.
    #[arg(long, default_value = "300px")]
    width: String,

    /// Embed height.
    #[arg(long, default_value = "200px")]
    height: String,

    /// Output template; %%url%% and %%iframe%% are substituted.
    #[arg(long)]
    template: Option<String>,

    /// Emit a JSON object instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BuildOutput<'a> {
    url: &'a str,
    embed: &'a str,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let language = cli.lang.clone();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        if let Some(TimerError::MissingFormField { .. }) = err.downcast_ref::<TimerError>() {
            if let Ok(message) = get_message(&language, "error-missing") {
                eprintln!("{message}");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.lang.trim().is_empty() {
        return Err(TimerError::MissingFormField { field: "lang" }.into());
    }

    let duration_ms = parse_duration(&cli.duration)?;
    let start = cli.start.unwrap_or_else(Utc::now);

    let preset = preset_text(cli.kind.into(), &cli.lang)?;
    let progress = cli.progress.or(preset.progress_message);
    let finished = cli.finished.or(preset.finished_message);
    let template = cli.template.unwrap_or(preset.template);

    let url = build_url(
        &cli.lang,
        start,
        duration_ms,
        progress.as_deref(),
        finished.as_deref(),
        cli.style.as_deref(),
    );
    let embed = build_embed(&template, &url, &cli.width, &cli.height);

    if cli.json {
        let output = BuildOutput {
            url: url.as_str(),
            embed: &embed,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{url}");
        println!();
        println!("{embed}");
    }

    Ok(())
}
