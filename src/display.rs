use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::countdown::{RemainingDuration, Unit};
use crate::errors::TimerError;
use crate::messages::get_message;

/// Zero-padded value and localized label for one visible unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldText {
    pub value: String,
    pub label: String,
}

/// One display slot. Units coarser than the highest nonzero unit carry no
/// text and render blank, so a three-hour timer shows no month or day slots
/// rather than "00".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitField {
    pub unit: Unit,
    pub text: Option<FieldText>,
}

/// Everything a host needs to paint one frame of the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub title: String,
    pub finished: bool,
    /// Ordered coarsest first: months, days, hours, minutes, seconds.
    pub fields: Vec<UnitField>,
}

/// Project a remaining-time breakdown into the fields a host should paint.
///
/// Pure apart from the message lookup; the title flips between the two given
/// texts exactly when `finished` flips.
pub fn display_model(
    remaining: &RemainingDuration,
    language: &str,
    progress_title: &str,
    finished_title: &str,
) -> Result<DisplayModel, TimerError> {
    let title = if remaining.finished {
        finished_title
    } else {
        progress_title
    };

    let mut fields = Vec::with_capacity(Unit::DESCENDING.len());
    for unit in Unit::DESCENDING {
        let text = if unit <= remaining.highest {
            Some(FieldText {
                value: format!("{:02}", remaining.value(unit)),
                label: get_message(language, unit.label_key())?,
            })
        } else {
            None
        };
        fields.push(UnitField { unit, text });
    }

    Ok(DisplayModel {
        title: title.to_string(),
        finished: remaining.finished,
        fields,
    })
}

/// Host adapter that paints successive display models.
///
/// The render loop never knows what kind of surface it is driving; a failed
/// `present` means the surface is gone and the loop should stop.
pub trait DisplaySink {
    fn present(&mut self, model: &DisplayModel) -> Result<()>;
}

/// Single-line terminal display, rewritten in place on every tick.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn present(&mut self, model: &DisplayModel) -> Result<()> {
        let mut line = model.title.clone();
        for field in &model.fields {
            if let Some(text) = &field.text {
                line.push(' ');
                line.push_str(&text.value);
                line.push(' ');
                line.push_str(&text.label);
            }
        }

        // \r + erase-to-end keeps the line stable as it shortens.
        write!(self.out, "\r{line}\x1b[K")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Machine-readable display: one JSON object per tick.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DisplaySink for JsonLinesSink<W> {
    fn present(&mut self, model: &DisplayModel) -> Result<()> {
        let json = serde_json::to_string(model)?;
        writeln!(self.out, "{json}")?;
        self.out.flush()?;
        Ok(())
    }
}
