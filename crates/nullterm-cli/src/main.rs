mod rain;
mod session;
mod ui;

use std::fs;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nullterm_core::config::Config;
use nullterm_core::content::ContentStore;
use nullterm_core::content::NodeKind;
use nullterm_core::interpreter::list_lines;
use nullterm_core::render::carousel_len;
use nullterm_core::render::render_file;
use nullterm_core::state::is_loading_line;
use nullterm_core::state::ShellState;
use nullterm_core::state::UiTheme;
use nullterm_core::UserAction;
use nullterm_exec::ManualClock;
use nullterm_exec::SystemClock;

use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "nullterm", version, about = "The NULL EEC club terminal")]
struct Cli {
    /// Config file (defaults to <config dir>/nullterm/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Go straight to the dashboard.
    #[arg(long, global = true)]
    skip_welcome: bool,
    /// matrix, cyber or amber.
    #[arg(long, global = true)]
    theme: Option<String>,
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Full-screen terminal (the default).
    Run,
    /// Run one terminal command and print what it writes.
    Exec {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        words: Vec<String>,
    },
    /// Print a file as plain text.
    Cat { name: String },
    /// List the files.
    Ls,
    /// Validate the bundled content and summarize it.
    Check {
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if cli.skip_welcome {
        config.ui.skip_welcome = true;
    }
    if let Some(theme) = &cli.theme {
        config.ui.theme = theme.parse::<UiTheme>()?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    init_logging(&config)?;

    let store = ContentStore::embedded().context("bundled content is invalid")?;
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_terminal(store, &config),
        Commands::Exec { words } => {
            for line in exec(store, &config, &words.join(" ")) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Cat { name } => {
            let Some(file) = store.find_by_name(&name) else {
                bail!("file \"{name}\" not found; try `nullterm ls`");
            };
            let Some(doc) = render_file(file) else {
                bail!("file \"{}\" has no content", file.name);
            };
            for line in doc.plain_lines() {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Ls => {
            for line in list_lines(&store) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Check { json } => {
            check(&store, json);
            Ok(())
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nullterm").join("config.toml"))
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };
    if explicit.is_some() && !path.exists() {
        bail!("config file {} does not exist", path.display());
    }
    Config::load(&path).with_context(|| format!("loading config from {}", path.display()))
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = match &config.logging.file {
        Some(path) => path.clone(),
        None => match dirs::data_local_dir() {
            Some(dir) => dir.join("nullterm").join("nullterm.log"),
            None => return Ok(()),
        },
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let (filter, valid) = log_filter(&config.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(false)
        .init();
    if !valid {
        warn!(level = %config.logging.level, "invalid log level, logging at info");
        eprintln!(
            "warning: invalid log level \"{}\", logging at info",
            config.logging.level
        );
    }
    Ok(())
}

/// Parses a level or directive list. Falls back to `info` and reports false
/// when `level` does not parse.
fn log_filter(level: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new("info"), false),
    }
}

fn shell_state(config: &Config) -> ShellState {
    ShellState::new(config.timing, config.ui.theme, config.ui.transcript_capacity)
}

fn run_terminal(store: ContentStore, config: &Config) -> anyhow::Result<()> {
    info!(files = store.len(), theme = config.ui.theme.label(), "starting terminal");
    let mut session = Session::new(store, shell_state(config), SystemClock::new());
    session.boot(config.ui.skip_welcome);
    ui::run(&mut session, config.ui.matrix_rain)
}

/// Runs `command` to natural completion on a simulated clock and returns the
/// transcript lines it added, loading lines excluded.
fn exec(store: ContentStore, config: &Config, command: &str) -> Vec<String> {
    let clock = ManualClock::new();
    let mut session = Session::new(store, shell_state(config), clock.clone());
    session.boot(true);
    let mark = session.state().transcript.mark();

    session.user(UserAction::SetInput(command.to_string()));
    session.user(UserAction::Enter);
    while session.state().is_loading() {
        let Some(wait) = session.time_until_next() else {
            warn!(command, "command still loading with no timer left");
            break;
        };
        clock.advance(wait);
        session.pump();
    }

    session
        .state()
        .transcript
        .lines_since(mark)
        .filter(|line| !is_loading_line(line))
        .map(str::to_string)
        .collect()
}

fn check(store: &ContentStore, json: bool) {
    if json {
        let files: Vec<serde_json::Value> = store
            .iter()
            .map(|file| {
                serde_json::json!({
                    "id": file.id,
                    "name": file.name,
                    "kind": file.kind.label(),
                    "content": file.content.as_ref().map(|content| content.kind_label()),
                    "slides": carousel_len(file),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "files": files,
            "quick_commands": store.dashboard().quick_commands.len(),
        });
        println!("{summary:#}");
        return;
    }

    println!("content ok: {} files", store.len());
    for file in store.iter() {
        let content = file
            .content
            .as_ref()
            .map_or("empty", |content| content.kind_label());
        let mut line = format!("  {:<22} {:<7} {content}", file.name, file.kind.label());
        if file.kind == NodeKind::Folder || carousel_len(file) > 0 {
            line.push_str(&format!(" ({} slides)", carousel_len(file)));
        }
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn store() -> ContentStore {
        ContentStore::embedded().expect("embedded content")
    }

    #[test]
    fn exec_returns_only_new_lines() {
        let lines = exec(store(), &Config::default(), "open TEAM.json");
        assert_eq!(lines, vec!["> open TEAM.json", "✓ Opened: team.json"]);
    }

    #[test]
    fn exec_unknown_command_prints_error_block() {
        let lines = exec(store(), &Config::default(), "rm -rf /");
        assert_eq!(lines[0], "> rm -rf /");
        assert_eq!(lines[1], "❌ Command not found: rm -rf /");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn exec_keeps_the_newest_lines_when_capacity_is_small() {
        let full = exec(store(), &Config::default(), "help");
        assert!(full.len() > 2);

        let mut config = Config::default();
        config.ui.transcript_capacity = 2;
        let lines = exec(store(), &config, "help");
        assert_eq!(lines, full[full.len() - 2..].to_vec());
    }

    #[test]
    fn log_filter_flags_bad_levels() {
        assert!(log_filter("debug").1);
        assert!(log_filter("nullterm_core=trace,warn").1);
        let (filter, valid) = log_filter("loud=[");
        assert!(!valid);
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn exec_clear_leaves_empty_transcript() {
        let lines = exec(store(), &Config::default(), "clear");
        assert!(lines.is_empty());
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::parse_from(["nullterm", "--theme", "amber", "exec", "open", "README.md"]);
        assert_eq!(cli.theme.as_deref(), Some("amber"));
        assert!(matches!(
            cli.command,
            Some(Commands::Exec { ref words }) if words == &["open", "README.md"]
        ));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[ui]\ntheme = \"cyber\"").expect("write");
        let config = load_config(Some(file.path())).expect("config");
        assert_eq!(config.ui.theme, UiTheme::Cyber);
    }
}
