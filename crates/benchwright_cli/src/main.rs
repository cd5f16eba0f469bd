//! Benchwright CLI
//!
//! Synthesizes workflow-platform tool definitions from blueprint files,
//! one at a time or as a batch over a directory.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use benchwright_synth::{SynthConfig, batch_process, process_blueprint};

#[derive(Parser)]
#[command(name = "benchwright", version)]
#[command(about = "Synthesize workflow-platform tool definitions from blueprints", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize one blueprint
    Synth {
        /// Path to the blueprint JSON file
        #[arg(short, long)]
        blueprint: PathBuf,
        /// Directory to write the tool definition into
        #[arg(short, long)]
        out_dir: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Synthesize every `*.json` blueprint in a directory
    Batch {
        /// Directory of blueprint JSON files
        #[arg(short, long)]
        blueprint_dir: PathBuf,
        /// Directory to write tool definitions into
        #[arg(short, long)]
        out_dir: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Deployment constants, from an optional JSON config file with explicit
/// flags winning over it.
#[derive(Args)]
struct ConfigArgs {
    /// JSON file holding deployment constants
    #[arg(long)]
    config: Option<PathBuf>,
    /// Container image reference
    #[arg(long)]
    docker_image: Option<String>,
    /// Citation DOI
    #[arg(long)]
    citation_doi: Option<String>,
    /// Source repository, `owner/name`
    #[arg(long)]
    repo_name: Option<String>,
    /// Invocation command name
    #[arg(long)]
    cli_command: Option<String>,
    /// Package name used in help text
    #[arg(long)]
    pkg_name: Option<String>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<SynthConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .wrap_err_with(|| format!("failed to parse config {}", path.display()))?
            }
            None => SynthConfig::default(),
        };
        if let Some(docker_image) = &self.docker_image {
            config.docker_image = docker_image.clone();
        }
        if let Some(citation_doi) = &self.citation_doi {
            config.citation_doi = citation_doi.clone();
        }
        if let Some(repo_name) = &self.repo_name {
            config.repo_name = repo_name.clone();
        }
        if let Some(cli_command) = &self.cli_command {
            config.cli_command = cli_command.clone();
        }
        if let Some(pkg_name) = &self.pkg_name {
            config.pkg_name = pkg_name.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    benchwright_cli::logging::init(cli.verbose);

    match cli.command {
        Commands::Synth {
            blueprint,
            out_dir,
            config,
        } => {
            let config = config.resolve()?;
            let dest = process_blueprint(&blueprint, &out_dir, &config)?;
            println!("{}", dest.display());
            Ok(())
        }
        Commands::Batch {
            blueprint_dir,
            out_dir,
            config,
        } => {
            let config = config.resolve()?;
            let summary = batch_process(&blueprint_dir, &out_dir, &config)?;
            println!(
                "synthesized {} tool definitions, {} failed",
                summary.succeeded, summary.failed
            );
            if !summary.ok() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synth_args_parse() {
        let cli = Cli::try_parse_from([
            "benchwright",
            "synth",
            "--blueprint",
            "bp.json",
            "--out-dir",
            "out",
            "--cli-command",
            "customcli",
        ])
        .unwrap();
        let Commands::Synth { blueprint, config, .. } = cli.command else {
            panic!("expected synth subcommand");
        };
        assert_eq!(blueprint, PathBuf::from("bp.json"));
        assert_eq!(config.cli_command.as_deref(), Some("customcli"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"cli_command": "filecli", "pkg_name": "FilePkg"}"#,
        )
        .unwrap();
        let args = ConfigArgs {
            config: Some(path),
            docker_image: None,
            citation_doi: None,
            repo_name: None,
            cli_command: Some("flagcli".to_string()),
            pkg_name: None,
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.cli_command, "flagcli");
        assert_eq!(config.pkg_name, "FilePkg");
        assert_eq!(config.docker_image, SynthConfig::default().docker_image);
    }

    #[test]
    fn test_resolve_without_config_uses_defaults() {
        let args = ConfigArgs {
            config: None,
            docker_image: None,
            citation_doi: None,
            repo_name: None,
            cli_command: None,
            pkg_name: None,
        };
        assert_eq!(args.resolve().unwrap(), SynthConfig::default());
    }
}
