use std::fmt::Write as _;
use std::io::{self, Write};

use pagesim::{FrameStatus, Outcome, StepRecord, Summary};

/// One column per frame: the page number, or dashes for an empty frame.
pub fn format_frames(frames: &[FrameStatus]) -> String {
    let mut line = String::with_capacity(frames.len() * 4);
    for frame in frames {
        match frame {
            Some(page) => {
                let _ = write!(line, "{:3} ", page);
            }
            None => line.push_str("--- "),
        }
    }
    line
}

pub fn format_step(step: &StepRecord) -> String {
    let action = match step.outcome {
        Outcome::Hit { .. } => "hit".to_string(),
        Outcome::Loaded { .. } => "free tile found".to_string(),
        Outcome::Replaced { evicted, .. } => format!("replace {}", evicted),
    };
    format!(
        "{}  next ref: {} {}",
        format_frames(&step.before),
        step.page,
        action
    )
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "{}", format_frames(&summary.frames))?;
    writeln!(out, "Number of page faults: {}", summary.faults)?;
    writeln!(out, "Number of References = {}", summary.references)?;
    writeln!(out, "Page Fault Rate = {:.3}", summary.fault_rate())?;
    writeln!(out, "Hits = {}", summary.hits)?;
    writeln!(out, "Hit Rate = {:.3}", summary.hit_rate())?;
    writeln!(out, "Replacements = {}", summary.replacements)
}
