//! `environment` subcommand.

use crate::{ctx::RfdContext, errors::RfdResult};
use clap::Args;

/// CLI arguments for the `environment` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct EnvironmentCmd;

impl EnvironmentCmd {
    /// Run the `environment` subcommand.
    pub fn run(self, ctx: RfdContext<'_>) -> RfdResult<()> {
        if let Some(home) = home::home_dir() {
            println!("Home directory={}", home.display());
        }
        println!(
            "RFD root directory={}",
            ctx.config.root_directory.display()
        );
        println!(
            "Templates directory={}",
            ctx.config.templates_directory.display()
        );

        let key_path = ctx.config.ssh_key_path()?;
        println!("SSH private key={}", key_path.display());

        // The public half lives alongside the private key by convention.
        let public_key_path = key_path.with_extension("pub");
        match std::fs::read_to_string(&public_key_path) {
            Ok(public_key) => println!("SSH public key={}", public_key.trim_end()),
            Err(_) => println!(
                "SSH public key not found at {}",
                public_key_path.display()
            ),
        }

        println!();
        println!("{:#?}", ctx.config);
        Ok(())
    }
}
