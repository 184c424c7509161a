use clap::{Args, Subcommand};
use config::CONFIG;
use profile::path::{self, PathError};
use std::path::PathBuf;
use url::Url;

#[derive(Subcommand, Debug)]
pub(in super::super) enum Commands {
    /// Encode a resource path for use as a relative file path
    Encode { path: String },
    /// Decode a previously encoded path
    Decode { encoded: String },
    /// Print where a resource is stored inside an export package
    Locate(LocateArgs),
}

#[derive(Args, Debug)]
pub(in super::super) struct LocateArgs {
    /// The URI of the resource
    uri: Url,

    /// The root directory of the export package
    #[arg(long, short, value_name = "DIR")]
    root: PathBuf,

    /// Locate the content file of a binary resource
    #[arg(long, conflicts_with_all = ["directory", "extension"])]
    binary: bool,

    /// Locate the directory of resources contained by the resource
    #[arg(long, conflicts_with = "extension")]
    directory: bool,

    /// Extension of the metadata file [default: from config]
    #[arg(long, short, value_name = "EXT")]
    extension: Option<String>,
}

fn locate(args: &LocateArgs) -> Result<PathBuf, PathError> {
    if args.binary {
        path::file_for_binary(&args.uri, &args.root)
    } else if args.directory {
        path::directory_for_container(&args.uri, &args.root)
    } else {
        let extension = args
            .extension
            .as_deref()
            .unwrap_or(CONFIG.metadata_extension());
        path::file_for_container(&args.uri, &args.root, extension)
    }
}

pub(super) fn run(cmd: Commands) -> Result<(), PathError> {
    match cmd {
        Commands::Encode { path: resource } => println!("{}", path::encode(&resource)),
        Commands::Decode { encoded } => println!("{}", path::decode(&encoded)?),
        Commands::Locate(args) => {
            let file = locate(&args)?;
            tracing::debug!(uri = %args.uri, file = %file.display(), "located resource");
            println!("{}", file.display());
        }
    }
    Ok(())
}
