use std::path::Path;

use crossbeam::channel::Receiver;
use scene_loader::{
    AutoLoadController, Broker, DirectoryScanner, FileStore, LoadMode, ProjectConfig,
    RegistryStore, RunModeTransition, SceneHost, console::LogMessage,
};

use crate::host::ConsoleHost;

const HELP: &str = "\
commands:
  folder <path>           choose the scene folder (absolute or project-relative)
  list                    rescan the folder and list its scenes
  open <n>                open scene n for editing
  edit                    mark the open scene as modified
  auto on|off             toggle auto-load on play
  target <n>              choose the auto-load target
  mode single|additive    choose how the target is loaded
  play                    enter run mode
  stop                    return to edit mode
  status                  show the current configuration
  exit                    quit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Folder(String),
    List,
    Open(usize),
    Edit,
    Auto(bool),
    Target(usize),
    Mode(LoadMode),
    Play,
    Stop,
    Status,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or("");
        let argument = words.collect::<Vec<_>>().join(" ");

        let index = |argument: &str| {
            argument
                .parse::<usize>()
                .map_err(|_| format!("expected a scene number, got `{}`", argument))
        };

        match (name, argument.as_str()) {
            ("help" | "?", _) => Ok(Command::Help),
            ("folder", "") => Err("folder needs a path".into()),
            ("folder", path) => Ok(Command::Folder(path.to_string())),
            ("list" | "ls", _) => Ok(Command::List),
            ("open", n) => index(n).map(Command::Open),
            ("edit", _) => Ok(Command::Edit),
            ("auto", "on") => Ok(Command::Auto(true)),
            ("auto", "off") => Ok(Command::Auto(false)),
            ("auto", _) => Err("auto takes `on` or `off`".into()),
            ("target", n) => index(n).map(Command::Target),
            ("mode", mode) => LoadMode::parse(mode)
                .map(Command::Mode)
                .ok_or_else(|| "mode takes `single` or `additive`".to_string()),
            ("play", _) => Ok(Command::Play),
            ("stop", _) => Ok(Command::Stop),
            ("status", _) => Ok(Command::Status),
            ("exit" | "quit", _) => Ok(Command::Exit),
            (other, _) => Err(format!("unknown command `{}`, try `help`", other)),
        }
    }
}

/// The scene loader window, as a line-oriented shell.
pub struct Shell {
    project: ProjectConfig,
    store: RegistryStore<FileStore>,
    broker: Broker,
    controller: AutoLoadController,
    host: ConsoleHost,
    log: Receiver<LogMessage>,
    running: bool,
}

impl Shell {
    pub fn new(
        project: ProjectConfig,
        controller: AutoLoadController,
        broker: Broker,
        log: Receiver<LogMessage>,
    ) -> Self {
        let mut store = RegistryStore::new(FileStore::for_project(&project), &project);
        store.get_or_create().refresh(&project, &DirectoryScanner);
        Self {
            host: ConsoleHost::new(project.clone()),
            project,
            store,
            broker,
            controller,
            log,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs one input line and prints its output.
    pub fn execute(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match Command::parse(line) {
            Ok(command) => self.run(command),
            Err(message) => println!("{}", message),
        }
        self.controller.pump(&mut self.store, &mut self.host);
        self.flush_log();
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Help => println!("{}", HELP),
            Command::Folder(path) => self.choose_folder(&path),
            Command::List => self.list(),
            Command::Open(index) => self.open(index),
            Command::Edit => self.host.mark_modified(),
            Command::Auto(enabled) => {
                self.store.get_or_create().set_auto_load(enabled);
                self.save();
            }
            Command::Target(index) => {
                if self.store.get_or_create().select_target(index) {
                    self.save();
                } else {
                    println!("No scene {}.", index);
                }
            }
            Command::Mode(mode) => {
                self.store.get_or_create().set_load_mode(mode);
                self.save();
            }
            Command::Play => self.set_playing(true),
            Command::Stop => self.set_playing(false),
            Command::Status => self.status(),
            Command::Exit => self.running = false,
        }
    }

    fn choose_folder(&mut self, path: &str) {
        let registry = self.store.get_or_create();
        let chosen = Path::new(path);
        let accepted = if chosen.is_absolute() {
            registry.choose_folder(chosen, &self.project)
        } else if self.project.is_content_path(path) {
            registry.set_folder(path);
            true
        } else {
            false
        };
        if !accepted {
            println!("{} is not inside {}.", path, self.project.content_root());
            return;
        }
        self.save();
        self.list();
    }

    fn list(&mut self) {
        let registry = self.store.get_or_create();
        registry.refresh(&self.project, &DirectoryScanner);

        println!("Path: {}", registry.folder_path());
        if registry.is_empty() {
            println!("No scene in path.");
            return;
        }
        for (index, entry) in registry.entries().iter().enumerate() {
            let marker = if registry.auto_load_enabled() && index == registry.target_index() {
                '*'
            } else {
                ' '
            };
            println!("{} {:>3}  {}", marker, index, entry.name);
        }
    }

    fn open(&mut self, index: usize) {
        let Some(entry) = self.store.get_or_create().entry(index).cloned() else {
            println!("No scene {}.", index);
            return;
        };
        if let Err(err) = self.host.open_scene(&entry.path) {
            println!("Cannot open {}: {}", entry.name, err);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.host.is_playing() == playing {
            return;
        }
        let (exiting, entered) = if playing {
            (RunModeTransition::ExitingEditMode, RunModeTransition::EnteredRunMode)
        } else {
            (RunModeTransition::ExitingRunMode, RunModeTransition::EnteredEditMode)
        };
        self.broker.publish(exiting);
        // The host saves before the mode actually changes.
        self.controller.pump(&mut self.store, &mut self.host);
        self.host.set_playing(playing);
        self.broker.publish(entered);
    }

    fn status(&mut self) {
        let registry = self.store.get_or_create();
        println!("Path:      {}", registry.folder_path());
        println!("Scenes:    {}", registry.len());
        println!("Auto-load: {}", if registry.auto_load_enabled() { "on" } else { "off" });
        match registry.target() {
            Some(target) => println!("Target:    {} ({})", target.name, registry.load_mode()),
            None => println!("Target:    none"),
        }
        println!("Mode:      {}", if self.host.is_playing() { "run" } else { "edit" });
        match self.host.open() {
            Some(open) if self.host.is_modified() => println!("Open:      {} (modified)", open),
            Some(open) => println!("Open:      {}", open),
            None => println!("Open:      -"),
        }
        if self.host.is_playing() {
            println!("Loaded:    {}", self.host.loaded().join(", "));
        }
    }

    fn save(&mut self) {
        if let Err(err) = self.store.save() {
            println!("Could not save scene loader data: {}", err);
        }
    }

    fn flush_log(&self) {
        for message in self.log.try_iter() {
            println!("{}", message);
        }
    }
}
