use clap::Parser;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Convert an archive for a session:\n    adbundle convert designs.zip --session s1\n\n\
                  Print the stored document IDs as JSON:\n    adbundle convert designs.zip --session s1 --json")]
pub struct ConvertArgs {
    /// Zip archive of design files
    pub archive: PathBuf,

    /// Session the resulting bundles are grouped under
    #[arg(long, short = 's')]
    pub session: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
