//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - serve: HTTP server arguments
//! - convert: Convert command arguments
//! - list, show: Listing and inspection arguments
//! - package, preview: Export arguments
//! - edit: Batch edit arguments
//! - clear: Clear command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod clear;
pub mod completions;
pub mod convert;
pub mod edit;
pub mod list;
pub mod package;
pub mod preview;
pub mod serve;
pub mod show;

pub use clear::ClearArgs;
pub use completions::CompletionsArgs;
pub use convert::ConvertArgs;
pub use edit::EditArgs;
pub use list::ListArgs;
pub use package::PackageArgs;
pub use preview::PreviewArgs;
pub use serve::ServeArgs;
pub use show::ShowArgs;

/// adbundle - ad design bundle converter
///
/// Convert zipped ad designs into previewable, editable HTML bundles.
#[derive(Parser, Debug)]
#[command(
    name = "adbundle",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Convert zipped ad designs into previewable, editable HTML bundles",
    long_about = "adbundle runs an external design converter on uploaded archives, stores the \
                  resulting HTML/CSS/image bundles, and serves them for sandboxed preview, \
                  editing and download.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  adbundle serve                               \x1b[90m# Start the HTTP API\x1b[0m\n   \
                  adbundle convert ads.zip --session s1        \x1b[90m# Convert and store an archive\x1b[0m\n   \
                  adbundle list --session s1                   \x1b[90m# List stored bundles\x1b[0m\n   \
                  adbundle package s1_banner.html              \x1b[90m# Download a bundle as zip\x1b[0m\n   \
                  adbundle edit s1_a.html s1_b.html --animate heading \x1b[90m# Batch edit\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file (defaults to ./adbundle.yaml when present)
    #[arg(long, short = 'c', global = true, env = "ADBUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding stored bundles
    #[arg(long, short = 'd', global = true, env = "ADBUNDLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// Convert a design archive and store the resulting bundles
    Convert(ConvertArgs),

    /// List stored bundles
    List(ListArgs),

    /// Show bundle information
    Show(ShowArgs),

    /// Write a bundle's zip package
    Package(PackageArgs),

    /// Render a sandboxed preview page
    Preview(PreviewArgs),

    /// Apply animation and font edits to one or more bundles
    Edit(EditArgs),

    /// Delete every stored bundle
    Clear(ClearArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
