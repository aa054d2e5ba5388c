//! The CLI for `rfd`.

use crate::{
    config::{RfdConfig, States},
    ctx::RfdContext,
    errors::{RfdError, RfdResult},
    subcommands::Subcommands,
};
use clap::{
    builder::styling::{AnsiColor, Color, Style},
    ArgAction, Parser,
};
use tracing::Level;

const ABOUT: &str = "rfd is a CLI application for creating and indexing Request for Discussion documents.";

/// The CLI application for `rfd`.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(about = ABOUT, version, styles = cli_styles())]
pub struct Cli {
    /// Verbosity level (0-4)
    #[arg(short, action = ArgAction::Count)]
    pub v: u8,
    /// The subcommand to run
    #[clap(subcommand)]
    pub subcommand: Subcommands,
}

impl Cli {
    /// Run the CLI application with the given arguments.
    pub fn run(self) -> RfdResult<()> {
        let this = self.init_tracing_subscriber()?;

        let repository =
            crate::git::active_repository().ok_or(RfdError::NotAGitRepository)?;

        match this.subcommand {
            // `init` creates the configuration the other subcommands load,
            // and `merge` touches nothing; both run without a context.
            Subcommands::Init(cmd) => cmd.run(&repository),
            Subcommands::Merge(cmd) => cmd.run(),
            Subcommands::New(cmd) => cmd.run(Self::load_context(&repository)?),
            Subcommands::Index(cmd) => cmd.run(Self::load_context(&repository)?),
            Subcommands::Check(cmd) => cmd.run(Self::load_context(&repository)?),
            Subcommands::Environment(cmd) => cmd.run(Self::load_context(&repository)?),
        }
    }

    /// Loads `config.yml` and the states file from the working directory and
    /// assembles the context the repository subcommands operate on.
    fn load_context(repository: &git2::Repository) -> RfdResult<RfdContext<'_>> {
        let cwd = std::env::current_dir()?;
        let config = RfdConfig::load(&cwd)?;
        let states = States::load(&config.templates_directory)?;
        Ok(RfdContext::new(repository, config, states))
    }

    /// Initializes the tracing subscriber
    ///
    /// # Returns
    /// - `RfdResult<Self>` - Ok if successful, Err otherwise.
    fn init_tracing_subscriber(self) -> RfdResult<Self> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(self)
    }
}

/// Styles for the CLI application.
const fn cli_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
