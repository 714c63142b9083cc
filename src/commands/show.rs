//! Show command implementation

use chrono::SecondsFormat;
use console::Style;

use super::helpers::Context;
use crate::cli::{GlobalArgs, ShowArgs};
use crate::dimensions::extract_dimensions;
use crate::domain::Bundle;
use crate::error::Result;
use crate::hash;
use crate::package;
use crate::rewrite::{self, RewriteDiagnostic};

pub fn run(globals: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let ctx = Context::open(globals)?;
    let bundle = ctx.repo.load(&args.id)?;
    let served = rewrite::rewrite_bundle_for_server(&bundle);

    if args.html {
        println!("{}", served.html);
        return Ok(());
    }
    show_bundle(&bundle, &served.diagnostics);
    Ok(())
}

fn show_bundle(bundle: &Bundle, diagnostics: &[RewriteDiagnostic]) {
    let label = Style::new().bold();
    let dimensions = extract_dimensions(&bundle.html);

    println!("{}", Style::new().bold().yellow().apply_to(&bundle.id));
    println!("  {} {}", label.apply_to("Session:"), bundle.session_id);
    println!(
        "  {} {}",
        label.apply_to("Created:"),
        bundle
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    println!(
        "  {} {} x {}",
        label.apply_to("Size:"),
        dimensions.width,
        dimensions.height
    );
    println!("  {} {} bytes", label.apply_to("HTML:"), bundle.html.len());
    if bundle.has_stylesheet() {
        println!("  {} {} bytes", label.apply_to("Stylesheet:"), bundle.css.len());
    } else {
        println!("  {} none", label.apply_to("Stylesheet:"));
    }

    println!("  {} {}", label.apply_to("Images:"), bundle.images.len());
    for (name, payload) in &bundle.images {
        match payload.decode(name) {
            Ok(bytes) => println!("    {name} ({} bytes)", bytes.len()),
            Err(e) => println!("    {name} {}", Style::new().red().apply_to(e)),
        }
    }

    match package::entries(bundle) {
        Ok(entries) => println!(
            "  {} {}",
            label.apply_to("Package:"),
            Style::new().dim().apply_to(hash::package_digest(&entries))
        ),
        Err(e) => println!(
            "  {} {}",
            label.apply_to("Package:"),
            Style::new().red().apply_to(e)
        ),
    }

    if !diagnostics.is_empty() {
        println!("  {}", Style::new().bold().yellow().apply_to("Warnings:"));
        for diagnostic in diagnostics {
            println!("    {diagnostic}");
        }
    }
}
