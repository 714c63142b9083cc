//! Package command implementation

use std::path::PathBuf;

use console::Style;

use super::helpers::{Context, write_file};
use crate::cli::{GlobalArgs, PackageArgs};
use crate::error::Result;
use crate::hash;
use crate::package;

pub fn run(globals: &GlobalArgs, args: PackageArgs) -> Result<()> {
    let ctx = Context::open(globals)?;
    let bundle = ctx.repo.load(&args.id)?;
    let entries = package::entries(&bundle)?;
    let archive = package::write_archive(&entries)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.zip", bundle.package_stem())));
    write_file(&output, &archive)?;

    println!(
        "{} {} ({} bytes, {})",
        Style::new().bold().green().apply_to("Wrote"),
        output.display(),
        archive.len(),
        hash::package_digest(&entries)
    );
    Ok(())
}
