use std::path::PathBuf;

use clap::Subcommand;
use pomogame_core::GameConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective rules as TOML
    Show {
        /// Rules file; stock rules when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a rules file
    Check {
        path: PathBuf,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { config } => {
            let cfg = GameConfig::load_or_default(config.as_deref())?;
            print!("{}", cfg.to_toml_string()?);
        }
        ConfigAction::Check { path } => {
            GameConfig::load(&path)?;
            println!("ok");
        }
    }
    Ok(())
}
