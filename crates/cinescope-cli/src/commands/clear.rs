use super::{prompts, App};
use crate::output::Output;
use clap::{ArgAction, Args};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;

#[derive(Args)]
pub struct ClearArgs {
    /// Clear both the library and the credentials
    #[arg(long, action = ArgAction::SetTrue)]
    all: bool,

    /// Clear the favorites and watchlist collections
    #[arg(long, action = ArgAction::SetTrue)]
    library: bool,

    /// Clear the stored API token
    #[arg(long, action = ArgAction::SetTrue)]
    credentials: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, action = ArgAction::SetTrue)]
    yes: bool,
}

pub async fn run_clear(args: ClearArgs, output: &Output) -> Result<()> {
    let clear_library = args.all || args.library;
    let clear_credentials = args.all || args.credentials;

    if !clear_library && !clear_credentials {
        output.warn("No clear option specified. Use --library, --credentials, or --all");
        output.println("\nExample: cinescope clear --library");
        return Ok(());
    }

    let app = App::new()?;

    if !args.yes {
        let mut targets = Vec::new();
        if clear_library {
            targets.push("the favorites and watchlist collections");
        }
        if clear_credentials {
            targets.push("the stored API token");
        }
        let confirmed = prompts::prompt_yes_no(
            &format!("This will delete {}. Continue?", targets.join(" and ")),
            false,
        )?;
        if !confirmed {
            output.info("Nothing cleared");
            return Ok(());
        }
    }

    if clear_library {
        let library_dir = app.paths.library_dir();
        if library_dir.exists() {
            fs::remove_dir_all(&library_dir).map_err(|e| {
                eyre!("Failed to remove library at {}: {}", library_dir.display(), e)
            })?;
            output.success(format!("Cleared library: {}", library_dir.display()));
        } else {
            output.info("No library found to clear");
        }
    }

    if clear_credentials {
        let credentials_file = app.paths.credentials_file();
        if credentials_file.exists() {
            fs::remove_file(&credentials_file).map_err(|e| {
                eyre!(
                    "Failed to remove credentials at {}: {}",
                    credentials_file.display(),
                    e
                )
            })?;
            output.success(format!(
                "Cleared credentials: {}",
                credentials_file.display()
            ));
        } else {
            output.info("No credentials file found to clear");
        }
    }

    Ok(())
}
