//! Convert command implementation

use console::Style;

use super::helpers::{Context, print_json, runtime};
use crate::cli::{ConvertArgs, GlobalArgs};
use crate::error::{Result, fs as fs_error};
use crate::pipeline::{self, ConvertOutcome};
use crate::progress::ConversionSpinner;

/// Run the converter on a local archive and store the bundles
pub fn run(globals: &GlobalArgs, args: ConvertArgs) -> Result<()> {
    if !args.archive.is_file() {
        return Err(fs_error::read_failed(
            args.archive.display().to_string(),
            "not a file",
        ));
    }

    let ctx = Context::open(globals)?;
    let converter = ctx.converter();
    let rt = runtime()?;

    let spinner = ConversionSpinner::start(format!("Converting {}", args.archive.display()));
    let outcome = match rt.block_on(pipeline::convert_archive(
        &converter,
        &ctx.repo,
        &args.session,
        &args.archive,
    )) {
        Ok(outcome) => {
            spinner.finish();
            outcome
        }
        Err(e) => {
            spinner.abandon();
            return Err(e);
        }
    };

    if args.json {
        return print_json(&outcome);
    }
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &ConvertOutcome) {
    println!(
        "{} {} bundle(s):",
        Style::new().bold().green().apply_to("Stored"),
        outcome.results.len()
    );
    for stored in &outcome.results {
        println!(
            "  {} -> {}",
            stored.filename,
            Style::new().cyan().apply_to(&stored.doc_id)
        );
    }

    if !outcome.warnings.is_empty() {
        println!();
        println!("{}", Style::new().bold().yellow().apply_to("Warnings:"));
        for warning in &outcome.warnings {
            println!("  {warning}");
        }
    }
}
