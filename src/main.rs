//! adbundle - ad design bundle converter
//!
//! Runs an external design converter on zipped uploads, stores the resulting
//! HTML/CSS/image bundles, and serves them for sandboxed preview, batch
//! editing and zip download.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod converter;
mod decoder;
mod dimensions;
mod domain;
mod editor;
mod error;
mod hash;
mod logging;
mod package;
mod pipeline;
mod progress;
mod rewrite;
mod server;
mod store;
mod temp;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.globals.verbose);

    let globals = &cli.globals;
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run(globals, args),
        Commands::Convert(args) => commands::convert::run(globals, args),
        Commands::List(args) => commands::list::run(globals, args),
        Commands::Show(args) => commands::show::run(globals, args),
        Commands::Package(args) => commands::package::run(globals, args),
        Commands::Preview(args) => commands::preview::run(globals, args),
        Commands::Edit(args) => commands::edit::run(globals, args),
        Commands::Clear(args) => commands::clear::run(globals, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
