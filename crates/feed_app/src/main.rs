mod config;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();
    let config = config::AppConfig::resolve(args)?;
    platform::logging::initialize(&config.log_file, config.log_level);
    platform::run_app(config)
}
