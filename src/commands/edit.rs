//! Edit command implementation
//!
//! Drives an [`EditorSession`] from the command line: every selected bundle
//! receives every edit, then all edited bundles are saved together.

use console::Style;

use super::helpers::{Context, runtime};
use crate::cli::{EditArgs, GlobalArgs};
use crate::editor::{Delay, EditEvent, EditorSession, Role};
use crate::error::{Result, request};

pub fn run(globals: &GlobalArgs, args: EditArgs) -> Result<()> {
    let events = edit_events(&args)?;
    let ctx = Context::open(globals)?;

    let mut session = EditorSession::new();
    for id in &args.ids {
        let html = ctx.repo.load(id)?.html;
        session.select_with(id, move |_| Ok(html))?;
    }

    for event in &events {
        let report = session.apply(event)?;
        for (bundle, element) in &report.missing {
            eprintln!(
                "{} {bundle}: no element '{element}'",
                Style::new().bold().yellow().apply_to("Warning:")
            );
        }
    }

    if args.dry_run {
        for id in session.selected() {
            println!("<!-- {id} -->");
            println!("{}", session.html(id).unwrap_or_default());
        }
        return Ok(());
    }

    let report = runtime()?.block_on(session.save_all(&ctx.repo));
    for id in &report.saved {
        println!("{} {id}", Style::new().bold().green().apply_to("Saved"));
    }
    for failure in &report.failed {
        eprintln!(
            "{} {}: {}",
            Style::new().bold().red().apply_to("Failed"),
            failure.filename,
            failure.reason
        );
    }
    report.failure().map_or(Ok(()), Err)
}

/// Translate the command line flags into editor events, in flag order:
/// animations on, animations off, then the font.
fn edit_events(args: &EditArgs) -> Result<Vec<EditEvent>> {
    if args.parent_delay.is_some() && args.animate.is_empty() {
        return Err(request::invalid_edit("--parent-delay needs at least one --animate"));
    }
    let parent_delay = args.parent_delay.map(Delay::new).transpose()?;

    let mut events = Vec::new();
    for role in &args.animate {
        events.push(EditEvent::Animate {
            role: role.parse::<Role>()?,
            enabled: true,
            parent_delay,
        });
    }
    for role in &args.still {
        events.push(EditEvent::Animate {
            role: role.parse::<Role>()?,
            enabled: false,
            parent_delay: None,
        });
    }
    if let Some(family) = &args.font {
        events.push(EditEvent::Font {
            family: Some(family.clone()),
        });
    }
    if args.no_font {
        events.push(EditEvent::Font { family: None });
    }

    if events.is_empty() {
        return Err(request::invalid_edit(
            "nothing to change; pass --animate, --still, --font or --no-font",
        ));
    }
    Ok(events)
}
