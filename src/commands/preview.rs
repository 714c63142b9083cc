//! Preview command implementation
//!
//! Renders the same sandboxed page the server offers at
//! `/preview/{session}/page`, for one session or a hand-picked set.

use console::Style;

use super::helpers::{Context, write_file};
use crate::cli::{GlobalArgs, PreviewArgs};
use crate::domain::Bundle;
use crate::editor::{PreviewFrame, render_page};
use crate::error::{Result, bundle as bundle_error};

pub fn run(globals: &GlobalArgs, args: PreviewArgs) -> Result<()> {
    let ctx = Context::open(globals)?;

    let (title, bundles) = match &args.session {
        Some(session) => {
            let bundles = ctx.repo.list(Some(session))?;
            if bundles.is_empty() {
                return Err(bundle_error::no_previews(session));
            }
            (format!("Previews: {session}"), bundles)
        }
        None => {
            let bundles = args
                .ids
                .iter()
                .map(|id| ctx.repo.load(id))
                .collect::<Result<Vec<Bundle>>>()?;
            (format!("Previews: {}", args.ids.join(", ")), bundles)
        }
    };

    let frames: Vec<PreviewFrame> = bundles.iter().map(PreviewFrame::for_bundle).collect();
    let page = render_page(&title, &frames);

    match args.output {
        Some(path) => {
            write_file(&path, page.as_bytes())?;
            println!(
                "{} {} ({} frame(s))",
                Style::new().bold().green().apply_to("Wrote"),
                path.display(),
                frames.len()
            );
        }
        None => println!("{page}"),
    }
    Ok(())
}
