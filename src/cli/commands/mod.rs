mod path;
mod show;
mod validate;

use super::Args;

use clap::{Parser, Subcommand};
use config::CONFIG;
use profile::{catalog, LoadError, Profile};
use std::path::PathBuf;

#[derive(Subcommand)]
pub(super) enum Commands {
    /// List the profiles built into this program.
    Profiles,
    /// Print a profile as JSON, with its base profile merged in.
    Show(ProfileArgs),
    /// Check bag metadata against a profile.
    ///
    /// Metadata may come from a bag-info.txt style file, from individual
    /// `--field` options, or both; options override values from the file.
    /// Every violation is reported at once.
    #[command(verbatim_doc_comment)]
    Validate(validate::Args),
    /// Encode, decode and locate export package paths.
    #[command(subcommand)]
    Path(path::Commands),
}

#[derive(Parser, Debug)]
#[command(next_help_heading = "Profile Options")]
pub(super) struct ProfileArgs {
    /// The built-in profile to use [default: from config]
    #[arg(long, short, value_name = "NAME")]
    profile: Option<String>,

    /// A profile document to load instead of a built-in profile
    #[arg(long, short = 'f', value_name = "FILE", conflicts_with = "profile")]
    profile_file: Option<PathBuf>,
}

impl ProfileArgs {
    fn load(&self) -> Result<Profile, LoadError> {
        match (&self.profile_file, &self.profile) {
            (Some(path), _) => Profile::from_path(path, CONFIG.max_profile_size()),
            (None, Some(name)) => Profile::builtin(name),
            (None, None) => Profile::builtin(CONFIG.profile()),
        }
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Commands::Profiles => {
            for name in catalog::names() {
                println!("{}", name);
            }
        }
        Commands::Show(args) => show::run(args.load()?)?,
        Commands::Validate(args) => validate::run(args)?,
        Commands::Path(cmd) => path::run(cmd)?,
    }
    Ok(())
}
