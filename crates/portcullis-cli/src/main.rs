//! Portcullis CLI.
//!
//! Serves the access-controlled web application and inspects its route
//! policies.
//!
//! # Quick Start
//!
//! ```bash
//! # Serve on the configured address (default 127.0.0.1:3000)
//! portcullis serve
//!
//! # Which routes exist and what guards them?
//! portcullis routes
//!
//! # Would user3 get into /finance-manager?
//! portcullis check --user user3 --route /finance-manager
//! ```

mod commands;
mod logging;
mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use portcullis_config::ConfigLoader;

/// Portcullis - role and attribute based access control for web routes.
#[derive(Parser)]
#[command(name = "portcullis")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding portcullis.toml (defaults to the current directory).
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server until Ctrl-C.
    Serve {
        /// Address to bind to (port only: 3000, or full: 127.0.0.1:3000).
        #[arg(short, long)]
        address: Option<String>,
    },

    /// List protected routes and their policies.
    Routes {
        /// Print the catalogue as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one route for one built-in user. Exits 0 on allow, 1 on deny.
    Check {
        /// Username from the built-in roster.
        #[arg(short, long)]
        user: String,

        /// Route path, e.g. /finance-manager.
        #[arg(short, long)]
        route: String,
    },

    /// Show the allow/deny decision for every user on every route.
    Matrix,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    style::set_no_color(cli.no_color);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            style::print_error(&format!("{e:#}"));
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(dir) = &cli.project_dir {
        loader = loader.with_project_dir(dir);
    }
    let config = loader.load()?;

    logging::init(&config.logging)?;

    match cli.command {
        Commands::Serve { address } => {
            commands::serve::run(config, address.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes { json } => {
            commands::routes::run(json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { user, route } => commands::check::run(&user, &route),
        Commands::Matrix => {
            commands::matrix::run();
            Ok(ExitCode::SUCCESS)
        }
    }
}
