//! List command implementation
//!
//! Lists stored bundles grouped by session folder.

use console::Style;

use super::helpers::{Context, print_json};
use crate::cli::{GlobalArgs, ListArgs};
use crate::domain::Bundle;
use crate::error::Result;
use crate::server::ListEntry;

/// Run list command
pub fn run(globals: &GlobalArgs, args: ListArgs) -> Result<()> {
    let ctx = Context::open(globals)?;
    let bundles = ctx.repo.list(args.session.as_deref())?;

    if args.json {
        let entries: Vec<ListEntry> = bundles.iter().map(ListEntry::for_bundle).collect();
        return print_json(&entries);
    }
    list_bundles(&bundles);
    Ok(())
}

fn list_bundles(bundles: &[Bundle]) {
    if bundles.is_empty() {
        println!("No bundles stored.");
        return;
    }

    println!("Stored bundles ({}):", bundles.len());
    let mut folder = None;
    for bundle in bundles {
        if folder != Some(bundle.folder()) {
            println!();
            println!("{}", Style::new().bold().yellow().apply_to(bundle.folder()));
            folder = Some(bundle.folder());
        }
        println!(
            "  {}  {}",
            Style::new().cyan().apply_to(bundle.display_name()),
            Style::new().dim().apply_to(&bundle.id)
        );
    }
}
