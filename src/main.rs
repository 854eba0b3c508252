use anyhow::Result;
use clap::{Parser, Subcommand};
use dvcs::areas::repository::Repository;
use dvcs::commands::porcelain::reset::ResetMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "DVCS_LOG";

#[derive(Parser)]
#[command(
    name = "dvcs",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "Snapshots a working directory into content-addressed objects, \
    with branches, checkout and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Stage files and directories")]
    Add {
        #[arg(index = 1, required = true, help = "Paths to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged snapshot as a new commit on top of HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create a branch, or list branches when no name is given"
    )]
    Branch {
        #[arg(index = 1, help = "Name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch, or detach HEAD at a commit",
        long_about = "This command refuses to run when local changes or untracked files would be overwritten."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or (abbreviated) commit digest")]
        target: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "Branch to merge")]
        branch: String,
    },
    #[command(name = "reset", about = "Move the current position to a commit")]
    Reset {
        #[arg(index = 1, help = "Commit digest (may be abbreviated)")]
        commit: String,
        #[arg(long, value_enum, default_value_t = ResetMode::Soft)]
        mode: ResetMode,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(long, help = "Print one commit per line")]
        oneline: bool,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw content of an object in the repository. \
        It requires the digest of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "Pretty-print commits and trees")]
        pretty: bool,
        #[arg(index = 1)]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree or commit")]
    LsTree {
        #[arg(short, long, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1)]
        sha: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository(path: Option<PathBuf>) -> Result<Repository> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    Repository::new(&path, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => open_repository(path)?.init()?,
        Commands::Add { paths } => open_repository(None)?.add(&paths)?,
        Commands::Commit { message } => {
            open_repository(None)?.commit(&message)?;
        }
        Commands::Branch { name } => {
            let repository = open_repository(None)?;
            match name {
                Some(name) => {
                    repository.create_branch(&name)?;
                }
                None => {
                    repository.list_branches()?;
                }
            }
        }
        Commands::Checkout { target } => {
            open_repository(None)?.checkout(&target)?;
        }
        Commands::Merge { branch } => {
            open_repository(None)?.merge(&branch)?;
        }
        Commands::Reset { commit, mode } => {
            open_repository(None)?.reset(&commit, mode)?;
        }
        Commands::Status => {
            open_repository(None)?.status()?;
        }
        Commands::Log { oneline } => {
            open_repository(None)?.log(oneline)?;
        }
        Commands::CatFile { pretty, sha } => {
            open_repository(None)?.cat_file(&sha, pretty)?;
        }
        Commands::HashObject { write, file } => {
            open_repository(None)?.hash_object(&file, write)?;
        }
        Commands::LsTree { recursive, sha } => open_repository(None)?.ls_tree(&sha, recursive)?,
    }

    Ok(())
}
