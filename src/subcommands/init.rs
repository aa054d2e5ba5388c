//! `init` subcommand.

use crate::{
    config::{RfdConfig, States},
    constants::{BOOTSTRAP_RFD_ID, README_FILE_NAME},
    ctx::RfdContext,
    errors::{RfdError, RfdResult},
};
use clap::Args;
use git2::Repository;
use nu_ansi_term::Color::Blue;
use std::path::{Path, PathBuf};

/// CLI arguments for the `init` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct InitCmd;

impl InitCmd {
    /// Run the `init` subcommand: collect the initial configuration, persist
    /// it, scaffold the bootstrap RFD `0001` on the trunk, and publish it.
    pub fn run(self, repository: &Repository) -> RfdResult<()> {
        let config = Self::collate_configuration()?;

        // The configuration lives at a conventional path in the working
        // directory, where every later invocation looks for it.
        config.write(&std::env::current_dir()?)?;

        let states = States::load(&config.templates_directory)?;
        let ctx = RfdContext::new(repository, config, states);

        let readme_path = ctx
            .config
            .rfd_dir(BOOTSTRAP_RFD_ID)
            .join(README_FILE_NAME);
        if readme_path.exists() {
            let overwrite = inquire::Confirm::new("File exists. Overwrite?")
                .with_default(false)
                .prompt()?;
            if overwrite {
                ctx.write_bootstrap_readme()?;
            } else {
                println!("Operation cancelled.");
            }
        } else {
            ctx.write_bootstrap_readme()?;
        }

        ctx.publish_bootstrap()?;
        println!(
            "Initialised RFD repository with bootstrap RFD `{}`.",
            Blue.paint(BOOTSTRAP_RFD_ID)
        );
        Ok(())
    }

    /// Interactively collects the initial configuration record.
    fn collate_configuration() -> RfdResult<RfdConfig> {
        let cwd = std::env::current_dir()?;

        let root_directory = prompt_existing_directory(
            "Path to the directory where the RFD repository lives:",
            &cwd,
        )?;
        println!("Using repository root: {}", root_directory.display());

        let templates_directory = prompt_existing_directory(
            "Path to the directory where the RFD templates are located:",
            &cwd.join("template"),
        )?;
        println!(
            "Using templates directory: {}",
            templates_directory.display()
        );

        let key_type =
            inquire::Select::new("Type of SSH key to authenticate with:", vec!["RSA", "ed25519"])
                .prompt()?;
        let private_key_file_name = match key_type {
            "ed25519" => "id_ed25519",
            _ => "id_rsa",
        }
        .to_string();
        println!("Using key file name: {}", private_key_file_name);

        let default_author = std::env::var("USER").unwrap_or_default();
        let initial_author = inquire::Text::new("Name of the first author:")
            .with_default(&default_author)
            .prompt()?;

        let organisation = inquire::Text::new("Name of the organisation:")
            .with_default("MyOrg")
            .prompt()?;

        Ok(RfdConfig {
            root_directory,
            templates_directory,
            private_key_file_name,
            initial_author,
            organisation,
            instigation_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            force_push: false,
        })
    }
}

/// Prompts for a directory path with a default, requiring that it exists.
fn prompt_existing_directory(message: &str, default: &Path) -> RfdResult<PathBuf> {
    let answer = inquire::Text::new(message)
        .with_default(&default.to_string_lossy())
        .prompt()?;
    let path = PathBuf::from(answer);
    if !path.is_dir() {
        return Err(RfdError::DirectoryNotFound(path.display().to_string()));
    }
    Ok(path)
}
