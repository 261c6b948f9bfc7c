use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use verflow::areas::repository::Repository;
use verflow::artifacts::objects::object_type::ObjectType;

/// Environment variable holding the log filter (e.g. `VF_LOG=debug`)
const LOG_ENV_VAR: &str = "VF_LOG";

#[derive(Parser)]
#[command(
    name = "verflow",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "verflow stores files as compressed, content-addressed objects, \
    stages them in a binary index and records snapshots as commits. \
    Repository data lives in a .verflow directory at the worktree root.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
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
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw payload of an object. \
        The name may be a full or abbreviated object id, HEAD, a branch or a tag."
    )]
    CatFile {
        #[arg(index = 1, help = "Expected object type (blob, tree, commit, tag)")]
        object_type: String,
        #[arg(index = 2, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as an object of the given type \
        and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(short = 't', long = "type", default_value = "blob", help = "The object type")]
        object_type: String,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(short, long, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "A tree, or a commit whose tree to list")]
        tree: String,
    },
    #[command(name = "ls-files", about = "List the entries of the staging index")]
    LsFiles {
        #[arg(short, long, help = "Show the stat data of every entry")]
        verbose: bool,
    },
    #[command(name = "rev-parse", about = "Resolve a name to an object id")]
    RevParse {
        #[arg(short = 't', long = "type", help = "Peel to an object of this type")]
        object_type: Option<String>,
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "show-ref", about = "List references")]
    ShowRef,
    #[command(
        name = "check-ignore",
        about = "Print the paths excluded by the ignore rules",
        long_about = "Paths are relative to the worktree root."
    )]
    CheckIgnore {
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(
        name = "add",
        about = "Add files to the staging index",
        long_about = "This command stages files for commit. \
        Directories are expanded to the files below them that no ignore rule excludes."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(
        name = "rm",
        about = "Remove files from the staging index and the working tree"
    )]
    Rm {
        #[arg(long, help = "Only unstage, keep the working files")]
        cached: bool,
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message. \
        The author is read from VF_AUTHOR_NAME and VF_AUTHOR_EMAIL."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status {
        #[arg(long, help = "Give the output in a short, stable format")]
        porcelain: bool,
    },
    #[command(
        name = "tag",
        about = "Create or list tags",
        long_about = "Without a name, list every tag. \
        With a name, create a lightweight tag, or an annotated tag object with -a."
    )]
    Tag {
        #[arg(short, long, help = "Create an annotated tag object")]
        annotate: bool,
        #[arg(short, long, help = "Message of an annotated tag")]
        message: Option<String>,
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, default_value = "HEAD")]
        object: String,
    },
    #[command(
        name = "checkout",
        about = "Write the files of a commit into an empty directory"
    )]
    Checkout {
        #[arg(index = 1)]
        commit: String,
        #[arg(index = 2)]
        path: PathBuf,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => PathBuf::from(path),
                None => std::env::current_dir()?,
            };
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init()?
        }
        Commands::CatFile {
            object_type,
            object,
        } => {
            let object_type = ObjectType::try_from(object_type.as_str())?;
            open_repository()?.cat_file(object_type, object)?
        }
        Commands::HashObject {
            write,
            object_type,
            file,
        } => {
            let object_type = ObjectType::try_from(object_type.as_str())?;
            open_repository()?.hash_object(Path::new(file), object_type, *write)?
        }
        Commands::LsTree { recursive, tree } => open_repository()?.ls_tree(tree, *recursive)?,
        Commands::LsFiles { verbose } => open_repository()?.ls_files(*verbose)?,
        Commands::RevParse { object_type, name } => {
            let object_type = object_type
                .as_deref()
                .map(ObjectType::try_from)
                .transpose()?;
            open_repository()?.rev_parse(name, object_type)?
        }
        Commands::ShowRef => open_repository()?.show_ref()?,
        Commands::CheckIgnore { paths } => open_repository()?.check_ignore(paths)?,
        Commands::Add { paths } => open_repository()?.add(paths)?,
        Commands::Rm { cached, paths } => open_repository()?.rm(paths, *cached)?,
        Commands::Commit { message } => open_repository()?.commit(message)?,
        Commands::Status { porcelain } => open_repository()?.status(*porcelain)?,
        Commands::Tag {
            annotate,
            message,
            name,
            object,
        } => open_repository()?.tag(name.as_deref(), object, *annotate, message.as_deref())?,
        Commands::Checkout { commit, path } => open_repository()?.checkout(commit, path)?,
    }

    Ok(())
}
