use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all stored bundles:\n    adbundle list\n\n\
                  List one session as JSON:\n    adbundle list --session s1 --json")]
pub struct ListArgs {
    /// Only list bundles of this session
    #[arg(long, short = 's')]
    pub session: Option<String>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}
