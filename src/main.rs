use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

mod error;
mod menu;
mod store;
mod task;
mod user;

use crate::error::Result;
use crate::menu::Menu;
use crate::store::{TaskStore, UserStore};

#[derive(Parser, Debug)]
#[command(name = "taskman", version, about = "Single-user task tracker backed by flat text files")]
struct Cli {
    /// Directory holding the tasks.txt and user.txt stores
    #[arg(long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let tasks = TaskStore::new(cli.data_dir.join("tasks.txt"));
    let users = UserStore::new(cli.data_dir.join("user.txt"));
    let mut menu = Menu::new(tasks, users, io::stdin().lock(), io::stdout().lock());
    menu.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_defaults_to_the_working_directory() {
        let cli = Cli::parse_from(["taskman"]);
        assert_eq!(cli.data_dir, PathBuf::from("."));

        let cli = Cli::parse_from(["taskman", "--data-dir", "/tmp/tracker"]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/tracker"));
    }
}
