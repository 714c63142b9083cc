use clap::Parser;
use std::path::PathBuf;

/// Arguments for the preview command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Preview one bundle:\n    adbundle preview s1_banner.html -o preview.html\n\n\
                  Preview a whole session:\n    adbundle preview --session s1 > preview.html")]
pub struct PreviewArgs {
    /// Bundle IDs to preview
    #[arg(required_unless_present = "session")]
    pub ids: Vec<String>,

    /// Preview every bundle of a session
    #[arg(long, short = 's', conflicts_with = "ids")]
    pub session: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
