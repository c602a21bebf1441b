use clap::Parser;

use crate::server::Environment;

#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[clap(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    pub config_file: String,
    /// Overrides the environment from the configuration file.
    #[clap(long, env = "APP_ENV", value_enum)]
    pub environment: Option<Environment>,
}
