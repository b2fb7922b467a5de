//! The `config` subcommand: inspect and initialize configuration.

use clap::Subcommand;
use smudge_core::Config;

/// Arguments for the `config` command.
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the active configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file if none exists
    Init,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }
        ConfigCommand::Init => {
            let path = Config::default_path();
            if path.exists() {
                println!("Config already exists at {}", path.display());
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, Config::default().to_toml()?)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
