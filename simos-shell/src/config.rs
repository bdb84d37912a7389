use std::path::PathBuf;

use clap::Parser;

use crate::session::ShellConfig;

#[derive(Parser, Debug)]
#[command(name = "simos", version, about = "Interactive shell over a root-confined directory")]
pub struct CliArgs {
    /// Real directory that backs the virtual `/`. Created if absent.
    #[arg(long, default_value = "simos-files", env = "SIMOS_ROOT")]
    pub root: PathBuf,

    /// Name shown at the start of the prompt
    #[arg(long, default_value = "simos", env = "SIMOS_PROMPT_NAME")]
    pub prompt_name: String,

    /// Log level (trace, debug, info, warn, error). Logs go to stderr.
    #[arg(long, default_value = "warn", env = "SIMOS_LOG_LEVEL")]
    pub log_level: String,

    /// Skip the startup logo
    #[arg(long)]
    pub no_banner: bool,
}

impl CliArgs {
    pub fn shell_config(&self) -> ShellConfig {
        ShellConfig {
            prompt_name: self.prompt_name.clone(),
            ..ShellConfig::default()
        }
    }
}
