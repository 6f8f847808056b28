use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tracing::{debug, error};

use crate::config::{RenderConfig, TimerConfig};
use crate::countdown::{time_remaining_at, Unit};
use crate::display::{display_model, DisplayModel, DisplaySink};
use crate::errors::TimerError;
use crate::messages::{get_message, KEY_FINISHED_TITLE, KEY_PROGRESS_TITLE};
use crate::time::Clock;

struct Titles {
    progress: String,
    finished: String,
}

/// Resolve the two title texts: a configured override wins, otherwise the
/// language default is used.
fn resolve_titles(config: &TimerConfig) -> Result<Titles, TimerError> {
    let progress = match &config.progress_message {
        Some(message) => message.clone(),
        None => get_message(&config.language, KEY_PROGRESS_TITLE)?,
    };
    let finished = match &config.finished_message {
        Some(message) => message.clone(),
        None => get_message(&config.language, KEY_FINISHED_TITLE)?,
    };

    Ok(Titles { progress, finished })
}

fn frame(
    config: &TimerConfig,
    titles: &Titles,
    now: DateTime<Utc>,
) -> Result<DisplayModel, TimerError> {
    let remaining = time_remaining_at(config.target_time, now);
    display_model(
        &remaining,
        &config.language,
        &titles.progress,
        &titles.finished,
    )
}

/// Compute a single display frame for "now" without starting a loop.
pub fn render_frame<C: Clock>(
    config: &TimerConfig,
    clock: &C,
) -> Result<DisplayModel, TimerError> {
    let titles = resolve_titles(config)?;
    frame(config, &titles, clock.now())
}

/// Drive a timer display until the sink goes away.
///
/// Every message the session will ever need is looked up before the first
/// paint; a missing language or key is fatal and nothing is rendered. After
/// that, each tick recomputes the full breakdown from the absolute target,
/// so the display cannot drift and never stops on its own: past expiry it
/// keeps showing time elapsed since the target.
pub async fn run<C, S>(
    config: TimerConfig,
    clock: C,
    mut sink: S,
    render_config: RenderConfig,
) -> Result<(), TimerError>
where
    C: Clock,
    S: DisplaySink,
{
    let titles = resolve_titles(&config)?;
    for unit in Unit::DESCENDING {
        get_message(&config.language, unit.label_key())?;
    }

    debug!(
        target_time = %config.target_time,
        language = %config.language,
        "starting render loop"
    );

    let mut ticks = clock.interval(render_config.tick_interval);

    // First paint happens immediately; ticks drive every repaint after it.
    loop {
        let model = frame(&config, &titles, clock.now())?;
        if let Err(err) = sink.present(&model) {
            error!("display sink failed, stopping render loop: {err}");
            break;
        }

        if ticks.next().await.is_none() {
            break;
        }
    }

    Ok(())
}
