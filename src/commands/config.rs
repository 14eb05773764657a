use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "ammbuild Configuration".bold());
            println!();

            println!("log_level: {}", config.log_level.as_filter());
            if let Some(log_file) = &config.log_file {
                println!("log_file: {}", log_file.display());
            }
            println!();

            println!("{}:", "bootstrap".cyan());
            println!("  package: {}", config.bootstrap.package.display());
            println!("  template: {}", config.bootstrap.template.display());
            println!("  output: {}", config.bootstrap.output.display());
            println!("  placeholder: {}", config.bootstrap.placeholder);
            println!("  nojekyll: {}", config.bootstrap.nojekyll);
            println!();

            println!("{}:", "bundle".cyan());
            println!("  root: {}", config.bundle.root.display());
            println!("  output: {}", config.bundle.output.display());
            println!("  format: {:?}", config.bundle.format);
        }
    }

    Ok(())
}
