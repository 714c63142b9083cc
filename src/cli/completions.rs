use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    adbundle completions bash > ~/.bash_completion.d/adbundle\n\n\
                  Generate zsh completions:\n    adbundle completions zsh > ~/.zfunc/_adbundle\n\n\
                  Generate fish completions:\n    adbundle completions fish > ~/.config/fish/completions/adbundle.fish\n\n\
                  Generate PowerShell completions:\n    adbundle completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
