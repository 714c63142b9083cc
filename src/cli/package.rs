use clap::Parser;
use std::path::PathBuf;

/// Arguments for the package command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Write s1_banner.zip to the current directory:\n    adbundle package s1_banner.html\n\n\
                  Choose the output file:\n    adbundle package s1_banner.html -o dist/banner.zip")]
pub struct PackageArgs {
    /// Bundle ID
    pub id: String,

    /// Output file (defaults to <bundle>.zip)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
