use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::Parser;
use log::LevelFilter;
use rustyline::{Editor, error::ReadlineError};
use scene_loader::{AutoLoadController, Broker, ProjectConfig, console::ConsoleLogger};

mod host;
mod shell;

use shell::Shell;

#[derive(Parser)]
#[command(name = "scene-loader")]
#[command(about = "Pick a scene to load automatically when entering play mode", long_about = None)]
#[command(version)]
struct Args {
    /// Project root containing the content folder
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Scene file extension, without the dot
    #[arg(long, env = "SCENE_LOADER_EXTENSION")]
    extension: Option<String>,

    /// Also show debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn project(&self) -> ProjectConfig {
        let project = ProjectConfig::new(&self.root);
        match &self.extension {
            Some(extension) => project.with_extension(extension),
            None => project,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    ensure!(
        args.root.is_dir(),
        "project root {} is not a directory",
        args.root.display()
    );

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log = ConsoleLogger::install(level).context("unable to install logger")?;

    // One broker and one auto-load handler for the whole session.
    let mut broker = Broker::new();
    let controller = AutoLoadController::install(&mut broker)?;

    let mut shell = Shell::new(args.project(), controller, broker, log);
    let mut editor = Editor::<()>::new();
    println!("Scene Loader. Type `help` for commands.");

    while shell.is_running() {
        match editor.readline("scenes> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str());
                shell.execute(&line);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_uses_root_and_extension() {
        let args =
            Args::try_parse_from(["scene-loader", "/work/game", "--extension", ".unity"]).unwrap();

        let project = args.project();

        assert_eq!(project.root, PathBuf::from("/work/game"));
        assert_eq!(project.scene_extension, "unity");
    }

    #[test]
    fn root_defaults_to_current_directory() {
        let args = Args::try_parse_from(["scene-loader"]).unwrap();
        assert_eq!(args.root, PathBuf::from("."));
        assert!(!args.verbose);
    }
}
