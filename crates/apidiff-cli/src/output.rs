//! Text and JSON rendering of diff results.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use apidiff_engine::{diff_text, DeltaLine, DiffCategory, DiffEvent};
use apidiff_permission::{PermissionComparison, RangeChange};
use apidiff_scan::DiffReport;
use colored::Colorize;

/// Render a directory scan report as grouped text.
pub fn report_text(report: &DiffReport, show_text: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let breaking = report.breaking().count();
    writeln!(
        out,
        "{} {} -> {}",
        "apidiff".bold(),
        report.old_root.display(),
        report.new_root.display()
    )?;
    writeln!(
        out,
        "  {} files compared, {} one-sided, {} changes ({} breaking)",
        report.files_compared,
        report.files_one_sided,
        report.events.len(),
        breaking
    )?;
    out.push_str(&events_text(&report.events, show_text)?);

    if !report.skipped.is_empty() {
        writeln!(out, "\n{} ({})", "Skipped".yellow().bold(), report.skipped.len())?;
        for unit in &report.skipped {
            writeln!(out, "  {}: {}", unit.path.display(), unit.reason.dimmed())?;
        }
    }
    Ok(out)
}

/// Render events grouped by compatibility, then category.
pub fn events_text(events: &[DiffEvent], show_text: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if events.is_empty() {
        writeln!(out, "\n{} No API changes.", "✓".green().bold())?;
        return Ok(out);
    }

    for compatible in [false, true] {
        let mut groups: BTreeMap<DiffCategory, Vec<&DiffEvent>> = BTreeMap::new();
        for event in events.iter().filter(|e| e.is_compatible == compatible) {
            groups.entry(event.category).or_default().push(event);
        }
        if groups.is_empty() {
            continue;
        }

        let count: usize = groups.values().map(Vec::len).sum();
        let heading = if compatible {
            "Compatible changes".green().bold()
        } else {
            "Breaking changes".red().bold()
        };
        writeln!(out, "\n{heading} ({count})")?;

        for (category, group) in groups {
            writeln!(out, "  {} {}", category.message().bold(), category_code(category).dimmed())?;
            for event in group {
                let location = if event.location.is_unknown() {
                    String::new()
                } else {
                    event.location.to_string()
                };
                writeln!(
                    out,
                    "    {} {} {}",
                    event.api_name.yellow(),
                    format!("({})", event.api_kind).dimmed(),
                    location
                )?;
                if event.message != category.message() {
                    writeln!(out, "      {}", event.message)?;
                }
                if show_text {
                    out.push_str(&text_delta(&event.old_text, &event.new_text)?);
                }
            }
        }
    }
    Ok(out)
}

fn category_code(category: DiffCategory) -> String {
    serde_json::to_value(category)
        .ok()
        .and_then(|v| v.as_str().map(|s| format!("[{s}]")))
        .unwrap_or_default()
}

fn text_delta(old: &str, new: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for line in diff_text(old, new, 2).lines() {
        match line {
            DeltaLine::Context(text) => writeln!(out, "        {text}")?,
            DeltaLine::Removed(text) => writeln!(out, "      {}", format!("- {text}").red())?,
            DeltaLine::Added(text) => writeln!(out, "      {}", format!("+ {text}").green())?,
        }
    }
    Ok(out)
}

pub fn permission_text(
    old: &str,
    new: &str,
    result: &PermissionComparison,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let verdict = match result.range_change {
        RangeChange::Unchanged => "unchanged".green(),
        RangeChange::Widened => "widened (compatible)".green(),
        RangeChange::Narrowed => "narrowed (breaking)".red(),
        RangeChange::Ambiguous => "changed (breaking)".red(),
    };
    writeln!(out, "old: {old}")?;
    writeln!(out, "new: {new}")?;
    writeln!(out, "range: {}", verdict.bold())?;
    writeln!(out, "variables: {}", result.variables.join(", "))?;

    let witnesses = [
        ("allowed before, rejected now", &result.narrowing_witnesses),
        ("rejected before, allowed now", &result.widening_witnesses),
    ];
    for (label, states) in witnesses {
        if states.is_empty() {
            continue;
        }
        writeln!(out, "{label}:")?;
        for state in states {
            let granted: Vec<&str> = result
                .variables
                .iter()
                .zip(state)
                .filter(|(_, held)| **held)
                .map(|(name, _)| name.as_str())
                .collect();
            let shown = if granted.is_empty() {
                "(none held)".to_string()
            } else {
                granted.join(", ")
            };
            writeln!(out, "  {shown}")?;
        }
    }
    Ok(out)
}

pub fn categories_text(categories: &[DiffCategory]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for category in categories {
        let verdict = if category.is_compatible() {
            format!("{:<10}", "compatible").green()
        } else {
            format!("{:<10}", "breaking").red()
        };
        writeln!(out, "{:<36} {verdict} {}", category_code(*category), category.message())?;
    }
    Ok(out)
}
