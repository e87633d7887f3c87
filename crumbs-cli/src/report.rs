use std::io::{self, Write};

use crossterm::style::Stylize;
use crumbs_core::{CleanEvent, CleanReport, format_size};

/// How a report line should be emphasized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Notice,
    Warning,
    Error,
    Success,
}

fn tone(event: &CleanEvent) -> Tone {
    match event {
        CleanEvent::WouldDelete { .. } => Tone::Notice,
        CleanEvent::SkippedUnsafe { .. } => Tone::Warning,
        CleanEvent::Failed { .. } => Tone::Error,
        CleanEvent::RemovedFile { .. } | CleanEvent::Emptied { .. } => Tone::Plain,
        CleanEvent::EntryCleaned { .. } => Tone::Success,
    }
}

/// Every line of the final report, in order
pub fn report_lines(report: &CleanReport) -> Vec<(Tone, String)> {
    if report.nothing_selected() {
        return vec![(
            Tone::Notice,
            "Nothing selected. No files were deleted.".to_string(),
        )];
    }

    let mut lines: Vec<(Tone, String)> = report
        .events
        .iter()
        .map(|event| (tone(event), event.to_string()))
        .collect();

    lines.push((Tone::Plain, String::new()));
    if report.dry_run {
        lines.push((
            Tone::Notice,
            "Dry run: nothing was deleted, 0 B reclaimed.".to_string(),
        ));
    } else if report.before.is_none() || report.after.is_none() {
        lines.push((Tone::Notice, "Reclaimed space: N/A".to_string()));
    } else {
        lines.push((
            Tone::Success,
            format!("Reclaimed space: {}", format_size(report.reclaimed_bytes)),
        ));
    }

    let failures = report.failures().count();
    if failures > 0 {
        lines.push((
            Tone::Error,
            format!(
                "{} item{} could not be deleted",
                failures,
                if failures == 1 { "" } else { "s" }
            ),
        ));
    }
    lines
}

pub fn print_report(report: &CleanReport) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for (tone, line) in report_lines(report) {
        match tone {
            Tone::Plain => writeln!(out, "{}", line)?,
            Tone::Notice => writeln!(out, "{}", line.yellow())?,
            Tone::Warning => writeln!(out, "{}", line.dark_yellow())?,
            Tone::Error => writeln!(out, "{}", line.red())?,
            Tone::Success => writeln!(out, "{}", line.green().bold())?,
        }
    }
    out.flush()
}
