use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEventKind, MouseEventKind,
};
use ratatui::Terminal;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tdrive::app::App;
use tdrive::config::Config;
use tdrive::model::fixture;
use tdrive::services::logging;
use tdrive::services::terminal_modes::{self, TerminalModes};
use tdrive::state::ViewMode;
use tdrive::ui::theme::Theme;

/// A terminal browser for a Drive-style folder tree
#[derive(Parser, Debug)]
#[command(name = "tdrive")]
#[command(about = "A terminal file browser over a Drive-style folder tree", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme name, overriding the configured theme
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// List available theme names and exit
    #[arg(long)]
    list_themes: bool,

    /// Initial view mode: grid or list
    #[arg(long, value_name = "MODE")]
    view: Option<String>,

    /// Path to log file for browser diagnostics (default: state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Load the config file and fold the command line flags into it
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        },
    };

    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
        // A named theme from the command line beats a configured file.
        config.theme_file = None;
    }
    if let Some(view) = &args.view {
        config.view_mode = ViewMode::from_name(view)
            .ok_or_else(|| anyhow::anyhow!("unknown view mode '{view}', expected grid or list"))?;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = Some(log_file.clone());
    }

    Ok(config)
}

fn resolve_theme(config: &Config) -> Result<Theme> {
    match &config.theme_file {
        Some(path) => Theme::load_from_file(path)
            .with_context(|| format!("loading theme from {}", path.display())),
        None => Ok(Theme::from_name(&config.theme)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Handle --list-themes early (no terminal setup needed)
    if args.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = resolve_config(&args)?;

    // Handle --dump-config early (no terminal setup needed)
    if args.dump_config {
        println!("{}", config.dump()?);
        return Ok(());
    }

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    logging::init_global(&log_path)?;
    tracing::info!("Drive browser starting");

    let theme = resolve_theme(&config)?;
    let drive = fixture::sample_drive()?;
    tracing::info!("Drive table loaded: {} nodes", drive.node_count());

    let mut app = App::new(drive, config.view_mode, theme, config.sidebar);

    // Restore the terminal before the default panic output prints.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut modes = TerminalModes::enable()?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_event_loop(&mut app, &mut terminal);

    modes.undo();
    tracing::info!("Drive browser exiting");

    result
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut needs_render = true;
    let mut pending_event: Option<CrosstermEvent> = None;

    loop {
        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let event = if let Some(e) = pending_event.take() {
            Some(e)
        } else {
            let timeout = if needs_render {
                FRAME_DURATION.saturating_sub(last_render.elapsed())
            } else {
                Duration::from_millis(50)
            };

            if event_poll(timeout)? {
                Some(event_read()?)
            } else {
                None
            }
        };

        let Some(event) = event else { continue };

        let (event, next) = coalesce_mouse_moves(event)?;
        pending_event = next;

        match event {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    app.handle_key(key_event.code, key_event.modifiers);
                    needs_render = true;
                }
            }
            CrosstermEvent::Mouse(mouse_event) => {
                if app.handle_mouse(mouse_event) {
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(_, _) => {
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Drain queued mouse moves, keeping only the newest.
///
/// A non-move event read while draining comes back as the pending event.
fn coalesce_mouse_moves(
    event: CrosstermEvent,
) -> Result<(CrosstermEvent, Option<CrosstermEvent>)> {
    fn is_move(event: &CrosstermEvent) -> bool {
        matches!(event, CrosstermEvent::Mouse(m) if m.kind == MouseEventKind::Moved)
    }

    if !is_move(&event) {
        return Ok((event, None));
    }

    let mut latest = event;
    while event_poll(Duration::ZERO)? {
        let next = event_read()?;
        if is_move(&next) {
            latest = next;
        } else {
            return Ok((latest, Some(next)));
        }
    }
    Ok((latest, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["tdrive"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.theme.is_none());
        assert!(!args.list_themes);
        assert!(args.view.is_none());
        assert!(!args.dump_config);
    }

    #[test]
    fn test_args_parse_flags() {
        let args = Args::try_parse_from([
            "tdrive",
            "--theme",
            "light",
            "--view",
            "list",
            "--log-file",
            "/tmp/browser.log",
        ])
        .unwrap();
        assert_eq!(args.theme.as_deref(), Some("light"));
        assert_eq!(args.view.as_deref(), Some("list"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/browser.log")));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["tdrive", "--frobnicate"]).is_err());
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{"theme": "light", "view_mode": "grid", "theme_file": "custom.json"}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "tdrive",
            "--config",
            config_path.to_str().unwrap(),
            "--theme",
            "high_contrast",
            "--view",
            "list",
        ])
        .unwrap();

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.theme, "high_contrast");
        assert_eq!(config.view_mode, ViewMode::List);
        // The explicit theme name displaces the configured theme file.
        assert!(config.theme_file.is_none());
    }

    #[test]
    fn test_resolve_config_rejects_unknown_view() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, "{}").unwrap();

        let args = Args::try_parse_from([
            "tdrive",
            "--config",
            config_path.to_str().unwrap(),
            "--view",
            "mosaic",
        ])
        .unwrap();
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args =
            Args::try_parse_from(["tdrive", "--config", "/nonexistent/tdrive.json"]).unwrap();
        assert!(resolve_config(&args).is_err());
    }
}
