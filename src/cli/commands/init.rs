//! Init and Config commands.

use anyhow::Context;
use fpath::Settings;

/// Create `.fpath/settings.toml` in the working directory.
pub fn run_init(force: bool) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("working directory is unavailable")?;
    let path = Settings::init_config_file(&cwd, force)?;
    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to customize your settings.");
    Ok(())
}

/// Print the effective settings.
pub fn run_config(config: &Settings) -> anyhow::Result<()> {
    match std::env::current_dir().ok().and_then(|d| Settings::find_config(&d)) {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no settings file found, showing defaults"),
    }
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
