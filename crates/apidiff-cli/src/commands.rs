use anyhow::{bail, Context};
use apidiff_engine::{DiffCategory, DiffEngine, DiffEvent, EngineConfig};
use apidiff_permission::PermissionComparator;
use apidiff_scan::Scanner;
use tracing::info;

use crate::cli::*;
use crate::config::FileConfig;
use crate::output;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = FileConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, cli.format),
        Command::DiffFile(args) => cmd_diff_file(args, config, cli.format),
        Command::Permission(args) => cmd_permission(args, config, cli.format),
        Command::Categories(args) => cmd_categories(args, cli.format),
    }
}

fn build_engine(report: &ReportArgs, config: &mut FileConfig) -> anyhow::Result<DiffEngine> {
    if let Some(max) = report.max_permission_variables {
        config.engine.max_permission_variables = max;
    }
    config.engine.validate()?;
    Ok(DiffEngine::new(config.engine.clone()))
}

fn fail_on_breaking(report: &ReportArgs, events: &[DiffEvent]) -> anyhow::Result<()> {
    let breaking = events.iter().filter(|e| !e.is_compatible).count();
    if report.fail_on_breaking && breaking > 0 {
        bail!("{breaking} breaking change(s) found");
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, mut config: FileConfig, format: OutputFormat) -> anyhow::Result<()> {
    let engine = build_engine(&args.report, &mut config)?;
    if args.no_skip_identical {
        config.scan.skip_identical = false;
    }
    info!(old = %args.old.display(), new = %args.new.display(), "scanning");

    let scanner = Scanner::new(engine, config.scan);
    let report = scanner
        .scan(&args.old, &args.new)
        .with_context(|| format!("cannot compare {} with {}", args.old.display(), args.new.display()))?;

    match format {
        OutputFormat::Text => print!("{}", output::report_text(&report, args.report.show_text)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    fail_on_breaking(&args.report, &report.events)
}

fn cmd_diff_file(args: DiffFileArgs, mut config: FileConfig, format: OutputFormat) -> anyhow::Result<()> {
    let engine = build_engine(&args.report, &mut config)?;
    let scanner = Scanner::new(engine, config.scan);
    let events = scanner.diff_files(&args.old, &args.new)?;

    match format {
        OutputFormat::Text => print!("{}", output::events_text(&events, args.report.show_text)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&events)?),
    }
    fail_on_breaking(&args.report, &events)
}

fn cmd_permission(args: PermissionArgs, config: FileConfig, format: OutputFormat) -> anyhow::Result<()> {
    let max = args
        .max_variables
        .unwrap_or(config.engine.max_permission_variables);
    EngineConfig {
        max_permission_variables: max,
    }
    .validate()?;
    let result = PermissionComparator::new(max)
        .compare(&args.old, &args.new)
        .context("cannot compare permission expressions")?;

    match format {
        OutputFormat::Text => print!("{}", output::permission_text(&args.old, &args.new, &result)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn cmd_categories(args: CategoriesArgs, format: OutputFormat) -> anyhow::Result<()> {
    let categories: Vec<DiffCategory> = DiffCategory::ALL
        .into_iter()
        .filter(|c| match (args.breaking, args.compatible) {
            (true, _) => !c.is_compatible(),
            (_, true) => c.is_compatible(),
            _ => true,
        })
        .collect();

    match format {
        OutputFormat::Text => print!("{}", output::categories_text(&categories)?),
        OutputFormat::Json => {
            let table: Vec<_> = categories
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "category": c,
                        "message": c.message(),
                        "is_compatible": c.is_compatible(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }
    Ok(())
}
