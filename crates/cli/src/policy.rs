//! `rollcall policy`: inspect, validate and select the shift policy.

use std::path::PathBuf;

use clap::Subcommand;

use crate::inputs::{load_policy, resolve_policy};
use crate::{CliError, Context};

#[derive(Subcommand)]
pub enum PolicyCommands {
    /// Print the effective policy as TOML
    #[command(after_help = "\
Examples:
  rollcall policy show > policy.toml
  rollcall policy show --policy district.toml")]
    Show {
        /// Policy TOML to show instead of the default
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    /// Check a policy file without running anything
    Validate { file: PathBuf },

    /// Make a policy file the default for `check` and `schedule`
    Use {
        #[arg(required_unless_present = "clear")]
        file: Option<PathBuf>,

        /// Go back to the built-in rules
        #[arg(long, conflicts_with = "file")]
        clear: bool,
    },
}

pub fn cmd_policy(ctx: &Context, cmd: PolicyCommands) -> Result<(), CliError> {
    match cmd {
        PolicyCommands::Show { policy } => {
            let policy = resolve_policy(ctx, policy)?;
            let text = policy.to_toml().map_err(CliError::recon)?;
            print!("{text}");
            Ok(())
        }
        PolicyCommands::Validate { file } => {
            let policy = load_policy(&file)?;
            eprintln!(
                "{}: ok ({} instructional keyword(s), starts {} / {})",
                file.display(),
                policy.shift.instructional.keywords.len(),
                policy.shift.instructional.start,
                policy.shift.non_instructional.start,
            );
            Ok(())
        }
        PolicyCommands::Use { file, clear } => {
            let mut settings = ctx.settings.clone();
            settings.policy_path = if clear {
                None
            } else {
                let file = file.ok_or_else(|| CliError::args("policy file required"))?;
                load_policy(&file)?;
                let file = std::fs::canonicalize(&file).unwrap_or(file);
                Some(file)
            };
            settings.save_to(&ctx.data_dir).map_err(|e| {
                CliError::general(format!("cannot save settings: {e}"))
            })?;
            match &settings.policy_path {
                Some(path) => eprintln!("default policy: {}", path.display()),
                None => eprintln!("default policy: built-in"),
            }
            Ok(())
        }
    }
}
