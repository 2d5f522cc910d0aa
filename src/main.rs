use anyhow::Result;
use bitlet::areas::repository::Repository;
use bitlet::artifacts::core::{PagerWriter, should_page};
use bitlet::errors::as_repository_error;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny local version-control system",
    long_about = "bitlet keeps whole-file snapshots of a working directory in a \
    content-addressed store, with branches, a staging area and three-way merges.",
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
        long_about = "This command creates a .bitlet repository in the current directory, \
        with a master branch pointing at the initial commit."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal if it is tracked"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from HEAD, \
        checkout <commit> -- <file> restores it from a commit, \
        and checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(help = "A branch name, or a commit id when a file follows")]
        target: Option<String>,
        #[arg(last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    let outcome = match &cli.command {
        Commands::Log | Commands::GlobalLog if should_page() => {
            let pager = minus::Pager::new();
            let repository = Repository::new(&pwd, Box::new(PagerWriter::new(pager.clone())))?;

            let outcome = run(&repository, &cli.command);
            if outcome.is_ok() {
                minus::page_all(pager)?;
            }
            outcome
        }
        command => {
            let repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;
            run(&repository, command)
        }
    };

    match outcome {
        Err(error) => match as_repository_error(&error) {
            Some(domain_error) => {
                println!("{domain_error}");
                Ok(())
            }
            None => Err(error),
        },
        Ok(()) => Ok(()),
    }
}

fn run(repository: &Repository, command: &Commands) -> Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(file),
            (Some(commit), Some(file)) => repository.checkout_file_from_commit(commit, file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => anyhow::bail!("checkout needs a branch, or -- <file>"),
        },
        Commands::Status => repository.status(),
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch),
    }
}
