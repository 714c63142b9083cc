//! Serve command implementation

use console::Style;

use super::helpers::{Context, runtime};
use crate::cli::{GlobalArgs, ServeArgs};
use crate::error::Result;
use crate::server::{self, AppState};

/// Run the HTTP API until Ctrl-C
pub fn run(globals: &GlobalArgs, args: ServeArgs) -> Result<()> {
    let mut ctx = Context::open(globals)?;
    if let Some(bind) = args.bind {
        ctx.settings.bind = bind;
    }
    let addr = ctx.settings.bind_addr()?;
    let state = AppState::new(ctx.repo.clone(), ctx.converter());

    println!(
        "{} http://{addr}",
        Style::new().bold().green().apply_to("Serving on")
    );
    runtime()?.block_on(server::serve(&ctx.settings, state))
}
