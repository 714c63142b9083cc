use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show bundle information:\n    adbundle show s1_banner.html\n\n\
                  Print the HTML as served:\n    adbundle show s1_banner.html --html")]
pub struct ShowArgs {
    /// Bundle ID
    pub id: String,

    /// Print the server-relative HTML instead of the summary
    #[arg(long)]
    pub html: bool,
}
