//! Command Execution Logic

use std::time::Duration;

use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::args::{DiscoverArgs, OutputFormat, ReportArgs};
use crate::cli::config_layer::build_layered_options;
use crate::cli::output::{
    display_diagnostics_summary, display_report_outcome, display_submission_set, SubmissionSetSummary,
};
use cribcheck_rs::api::results::{load_comparison_records, resolve_comparisons};
use cribcheck_rs::lang::registry::registered_languages;
use cribcheck_rs::{
    discover, ComparisonResult, Diagnostics, ReportAssembler, ReportOutcome, RunOptions,
    SubmissionSet,
};

fn discover_with(options: &RunOptions, diagnostics: &mut Diagnostics) -> anyhow::Result<SubmissionSet> {
    let exclusions = options.exclusion_set()?;
    let set = discover(&options.root_directory, options, &exclusions, diagnostics)?;
    Ok(set)
}

/// Run discovery and print the submission set
pub fn discover_command(args: &DiscoverArgs) -> anyhow::Result<()> {
    let options = build_layered_options(&args.discovery, &args.discovery)?;
    let mut diagnostics = Diagnostics::new();
    let set = discover_with(&options, &mut diagnostics)?;

    match args.format {
        OutputFormat::Json => {
            let summary = SubmissionSetSummary::new(&options, &set, &diagnostics);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Human => {
            display_submission_set(&options, &set);
            display_diagnostics_summary(&diagnostics);
        }
    }

    Ok(())
}

/// Run discovery, resolve comparison results and assemble the report
pub fn report_command(args: &ReportArgs) -> anyhow::Result<()> {
    let options = build_layered_options(&args.discovery, args)?;
    let mut diagnostics = Diagnostics::new();
    let set = discover_with(&options, &mut diagnostics)?;

    let records = load_comparison_records(&args.comparisons)?;
    let comparisons = resolve_comparisons(&records, &set)?;
    info!("Loaded {} comparison(s)", comparisons.len());

    let result = ComparisonResult::new(
        &set,
        comparisons,
        &options,
        Duration::from_millis(args.duration_ms),
    )?;
    let outcome = ReportAssembler::new().assemble(&result, &args.out, &mut diagnostics);

    display_report_outcome(&outcome);
    display_diagnostics_summary(&diagnostics);

    if outcome == ReportOutcome::Failed {
        anyhow::bail!("Report could not be written to {}", args.out.display());
    }
    Ok(())
}

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default cribcheck configuration".dimmed());
    println!("{}", "# Save this to .cribcheck.yml or pass it with --config".dimmed());
    println!();

    let yaml_output = serde_yaml::to_string(&RunOptions::default())?;
    println!("{}", yaml_output);

    Ok(())
}

/// List the built-in languages
pub fn list_languages() {
    let languages = registered_languages();
    println!("{}", "Supported Languages".bright_blue().bold());
    println!("   Found {} supported languages", languages.len());
    println!();

    for info in languages {
        let view = info
            .view_suffix
            .map(|suffix| format!(" (view files: {suffix})"))
            .unwrap_or_default();
        println!(
            "  {:<10} {:<16} {}{}",
            info.key.cyan(),
            info.name,
            info.suffixes.join(", ").dimmed(),
            view
        );
    }
}
