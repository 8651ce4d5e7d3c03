use anyhow::Result;
use clap::Parser;
use taborder::cli::{self, Cli};
use taborder::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config errors are reported after logging is up
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    taborder::debug::init_log_bridge(taborder::debug::resolve_level(
        cli.log_level,
        config.log_level,
    ));
    if let Some(e) = config_error {
        log::warn!("Ignoring config at {:?}: {e}", Config::config_path());
    }

    let code = cli::run(cli, &config)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
