use clap::Parser;

/// Arguments for the serve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Serve on the configured address:\n    adbundle serve\n\n\
                  Serve on all interfaces:\n    adbundle serve --bind 0.0.0.0:8080")]
pub struct ServeArgs {
    /// Address to listen on (overrides `bind` in adbundle.yaml)
    #[arg(long, short = 'b')]
    pub bind: Option<String>,
}
