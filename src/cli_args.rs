use clap::Parser;

/// Runs the book fixture service.
#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the YAML server configuration.
    #[clap(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    pub config_file: String,
}
