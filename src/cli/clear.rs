use clap::Parser;

/// Arguments for the clear command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Delete all stored bundles after confirming:\n    adbundle clear\n\n\
                  Delete without asking:\n    adbundle clear --yes")]
pub struct ClearArgs {
    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}
