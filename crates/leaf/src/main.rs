//! Leaf CLI - step-through record viewer TUI

mod app;
mod config;
mod logging;
mod ui;

use anyhow::{Context, Result};
use app::{App, MessageKind};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use leaf_core::{Command, Dataset, LoadError, NavError, RecordNavigator};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "leaf")]
#[command(author, version, about = "A step-through record viewer")]
struct Args {
    /// CSV file, or a .json file of rows; `-` or omitted reads stdin
    path: Option<PathBuf>,

    /// Headers for JSON sources that carry bare rows (comma separated)
    #[arg(long, value_delimiter = ',')]
    headers: Option<Vec<String>>,

    /// Start at this 1-based record number
    #[arg(long, allow_hyphen_values = true)]
    goto: Option<i64>,

    /// Start filtered to records whose company contains this text
    #[arg(long)]
    filter: Option<String>,

    /// Print the resulting view as JSON and exit instead of opening the TUI
    #[arg(long)]
    snapshot: bool,

    /// Start in zen mode
    #[arg(long)]
    zen: bool,

    /// Theme mode: dark or light
    #[arg(long, value_enum)]
    theme_mode: Option<CliThemeMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliThemeMode {
    Dark,
    Light,
}

/// Where the records come from
enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => InputSource::File(p.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }

    fn display_name(&self) -> String {
        match self {
            InputSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            InputSource::Stdin => "stdin".to_string(),
        }
    }

    fn is_json(&self) -> bool {
        match self {
            InputSource::File(path) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json")),
            InputSource::Stdin => false,
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => std::fs::read_to_string(path)
                .context(format!("Failed to read: {}", path.display())),
            InputSource::Stdin => {
                if io::stdin().is_terminal() {
                    anyhow::bail!(
                        "Usage: leaf <file.csv|file.json>\n\
                         \n\
                         Or pipe CSV text into leaf on stdin."
                    );
                }
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

/// Load the dataset. A source without records yields an empty dataset so
/// the viewer can show "no data"; malformed JSON is an error.
fn load_dataset(source: &InputSource, default_headers: &[String]) -> Result<Dataset> {
    let text = source.read()?;
    let loaded = if source.is_json() {
        Dataset::from_json(&text, default_headers)
    } else {
        Dataset::from_text(&text)
    };
    match loaded {
        Ok(dataset) => Ok(dataset),
        Err(LoadError::EmptyDataset) => {
            warn!(source = %source.display_name(), "no records found");
            Ok(Dataset::default())
        }
        Err(e) => Err(e).context(format!("Failed to load {}", source.display_name())),
    }
}

/// Commands requested on the command line, in application order
fn initial_commands(args: &Args) -> Vec<Command> {
    let mut commands = Vec::new();
    if let Some(number) = args.goto {
        commands.push(Command::JumpTo(number));
    }
    if let Some(term) = args.filter.clone() {
        commands.push(Command::ApplyFilter(term));
    }
    commands
}

fn apply_commands(navigator: &mut RecordNavigator, commands: Vec<Command>) -> Result<(), NavError> {
    for command in commands {
        navigator.dispatch(command)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init();
    let config = config::Config::load();

    let source = InputSource::from_arg(args.path.as_deref());
    let default_headers = args
        .headers
        .clone()
        .unwrap_or_else(|| config.data.default_headers.clone());
    let dataset = load_dataset(&source, &default_headers)?;
    info!(source = %source.display_name(), records = dataset.len(), "starting");

    let mut navigator = RecordNavigator::new(dataset);
    let startup = apply_commands(&mut navigator, initial_commands(&args));

    if args.snapshot {
        startup?;
        let json = serde_json::to_string_pretty(&navigator.snapshot())?;
        println!("{}", json);
        return Ok(());
    }

    let mut app = App::new(navigator, source.display_name());
    app.zen_mode = args.zen || config.ui.zen;
    app.empty_placeholder = config.ui.empty_placeholder.clone();

    // Compute theme mode: CLI overrides config, default to dark
    let light_mode = match args.theme_mode {
        Some(CliThemeMode::Light) => true,
        Some(CliThemeMode::Dark) => false,
        None => config.ui.is_light_mode(),
    };
    app.theme = config.ui.colors.resolve(light_mode);

    if let Err(err) = startup {
        app.report(err);
    } else if app.navigator.dataset().is_empty() {
        app.show_message(MessageKind::Info, "No records found");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(me) => app.handle_mouse(me),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaf_core::Mode;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "leaf",
            "people.json",
            "--headers",
            "Name,Company",
            "--goto",
            "3",
            "--filter",
            "acme",
            "--snapshot",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("people.json")));
        assert_eq!(
            args.headers,
            Some(vec!["Name".to_string(), "Company".to_string()])
        );
        assert_eq!(
            initial_commands(&args),
            vec![Command::JumpTo(3), Command::ApplyFilter("acme".into())]
        );
        assert!(args.snapshot);
    }

    #[test]
    fn test_negative_goto_accepted_by_parser() {
        let args = Args::try_parse_from(["leaf", "x.csv", "--goto", "-2"]).unwrap();
        assert_eq!(args.goto, Some(-2));
    }

    #[test]
    fn test_input_source() {
        assert!(matches!(InputSource::from_arg(None), InputSource::Stdin));
        assert!(matches!(
            InputSource::from_arg(Some(Path::new("-"))),
            InputSource::Stdin
        ));
        let source = InputSource::from_arg(Some(Path::new("data/People.JSON")));
        assert!(source.is_json());
        assert_eq!(source.display_name(), "People.JSON");
        assert!(!InputSource::from_arg(Some(Path::new("a.csv"))).is_json());
    }

    fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> InputSource {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        InputSource::File(path)
    }

    #[test]
    fn test_load_headers_only_csv_opens_empty_viewer() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = write_source(&dir, "people.csv", "Name,Company\n\n");
        let dataset = load_dataset(&source, &[]).unwrap();
        assert!(dataset.is_empty());

        let navigator = RecordNavigator::new(dataset);
        assert_eq!(navigator.mode(), Mode::Empty);
        assert_eq!(navigator.snapshot().mode, Mode::Empty);
    }

    #[test]
    fn test_load_empty_json_array_opens_empty_viewer() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = write_source(&dir, "people.json", "[]");
        let dataset = load_dataset(&source, &["Name".to_string()]).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_load_json_rows_use_given_headers() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = write_source(&dir, "people.json", r#"[["Ann", "Acme"], ["Bo", null]]"#);
        let headers = vec!["Name".to_string(), "Company".to_string()];
        let dataset = load_dataset(&source, &headers).unwrap();
        assert_eq!(dataset.headers(), headers.as_slice());
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.company_column(), Some(1));
        assert_eq!(dataset.value(1, 1), "");
    }

    #[test]
    fn test_load_csv_ignores_json_headers() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = write_source(&dir, "people.csv", "Name,Company\nAnn,Acme\n");
        let dataset = load_dataset(&source, &["Other".to_string()]).unwrap();
        assert_eq!(dataset.headers()[0], "Name");
    }

    #[test]
    fn test_load_malformed_json_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = write_source(&dir, "bad.json", "[[\"Ann\",");
        let err = load_dataset(&source, &[]).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to load bad.json"));
        assert!(message.contains("invalid JSON dataset"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = InputSource::File(dir.path().join("missing.csv"));
        let err = load_dataset(&source, &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_apply_commands_stops_at_first_error() {
        let mut navigator =
            RecordNavigator::from_text("Name,Company\nAnn,Acme\nBo,Zenith\n").unwrap();
        let err = apply_commands(
            &mut navigator,
            vec![Command::JumpTo(2), Command::ApplyFilter("nope".into())],
        )
        .unwrap_err();
        assert!(matches!(err, NavError::NoMatches { .. }));
        assert_eq!(navigator.position(), Some(1));
    }
}
