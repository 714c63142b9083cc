use clap::Parser;

/// Arguments for the edit command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Fade in the heading of two bundles, parent delayed by 2s:\n    \
                  adbundle edit s1_a.html s1_b.html --animate heading --parent-delay 2\n\n\
                  Stop animating the call to action:\n    adbundle edit s1_a.html --still cta\n\n\
                  Switch the custom font:\n    adbundle edit s1_a.html --font \"Open Sans\"\n\n\
                  Preview the result without saving:\n    adbundle edit s1_a.html --animate logo --dry-run")]
pub struct EditArgs {
    /// Bundle IDs; every edit applies to all of them
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Role to animate (heading, sub-heading-N, offer, cta, logo, background)
    #[arg(long, value_name = "ROLE")]
    pub animate: Vec<String>,

    /// Role to stop animating
    #[arg(long, value_name = "ROLE")]
    pub still: Vec<String>,

    /// Delay in seconds (0-5) for the parent of animated elements
    #[arg(long, value_name = "N")]
    pub parent_delay: Option<u8>,

    /// Custom font family to load
    #[arg(long, value_name = "FAMILY", conflicts_with = "no_font")]
    pub font: Option<String>,

    /// Remove the custom font
    #[arg(long)]
    pub no_font: bool,

    /// Print the edited HTML instead of saving
    #[arg(long)]
    pub dry_run: bool,
}
