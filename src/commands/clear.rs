//! Clear command implementation

use console::{Style, Term};

use super::helpers::Context;
use crate::cli::{ClearArgs, GlobalArgs};
use crate::error::{Result, request};

pub fn run(globals: &GlobalArgs, args: ClearArgs) -> Result<()> {
    let ctx = Context::open(globals)?;
    if !args.yes && !confirm()? {
        println!("Aborted.");
        return Ok(());
    }

    let removed = ctx.repo.clear()?;
    println!(
        "{} {removed} stored bundle(s)",
        Style::new().bold().green().apply_to("Removed")
    );
    Ok(())
}

fn confirm() -> Result<bool> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(request::invalid(
            "Refusing to clear without --yes outside a terminal",
        ));
    }
    term.write_str("Delete all stored bundles? [y/N] ")?;
    let answer = term.read_line()?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
