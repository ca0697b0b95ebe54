//! `hostctl config` - diff, push and pull of config.toml

use colored::Colorize;

use hostctl_core::{DriftReport, PushOptions, PushReport};

use super::Context;
use crate::cli::ConfigAction;
use crate::error::Result;
use crate::output::{self, print_unified_diff};

pub async fn run(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Diff => run_diff(ctx).await,
        ConfigAction::Push { dry_run } => run_push(ctx, dry_run).await,
        ConfigAction::Pull => run_pull(ctx).await,
    }
}

/// Show drift without changing anything
async fn run_diff(ctx: &Context) -> Result<()> {
    let local = ctx.load_config()?;
    let recorded = local.project_id.clone();

    let report = ctx
        .with_engine(recorded.as_deref(), move |engine| Ok(engine.diff(&local)?))
        .await?;

    output::emit(ctx.output, &report, print_drift)
}

async fn run_push(ctx: &Context, dry_run: bool) -> Result<()> {
    let local = ctx.load_config()?;
    let recorded = local.project_id.clone();
    let options = PushOptions { dry_run };

    let report = ctx
        .with_engine(recorded.as_deref(), move |engine| {
            Ok(engine.push(&local, &options)?)
        })
        .await?;

    output::emit(ctx.output, &report, print_push)
}

/// Refresh managed values from the platform and write config.toml back
async fn run_pull(ctx: &Context) -> Result<()> {
    let path = ctx.config_path();
    let local = ctx.load_config()?;
    let recorded = local.project_id.clone();

    let pulled = ctx
        .with_engine(recorded.as_deref(), move |engine| Ok(engine.pull(&local)?))
        .await?;
    pulled.update_file(&path)?;

    output::emit(ctx.output, &pulled, |_| {
        println!(
            "{} Updated {} from the remote project.",
            "OK".green().bold(),
            path.display().to_string().yellow()
        );
    })
}

fn print_drift(report: &DriftReport) {
    print_skipped(&report.skipped);

    if !report.has_drift() {
        println!(
            "{} Remote project matches config.toml.",
            "OK".green().bold()
        );
        return;
    }

    for section in report.drifted() {
        print_unified_diff(&section.diff);
    }
    println!();
    println!("Run {} to apply these changes.", "hostctl config push".cyan());
}

fn print_push(report: &PushReport) {
    print_skipped(&report.drift.skipped);

    if report.is_noop() {
        println!(
            "{} No changes needed. Remote project is in sync.",
            "OK".green().bold()
        );
        return;
    }

    for section in report.drift.drifted() {
        print_unified_diff(&section.diff);
    }
    println!();
    for action in &report.actions {
        let marker = if report.dry_run {
            "~".yellow()
        } else {
            "+".green()
        };
        println!("  {} {}", marker, action);
    }

    if report.dry_run {
        println!();
        println!("Run {} to apply these changes.", "hostctl config push".cyan());
    }
}

fn print_skipped(skipped: &[String]) {
    if !skipped.is_empty() {
        println!(
            "{} {}",
            "Not managed:".dimmed(),
            skipped.join(", ").dimmed()
        );
    }
}
