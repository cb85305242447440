use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use whack::{
    app::{self, App},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::{GameSettings, GameState},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
};

const FRAME_RATE_MS: u64 = 100;

/// whack-a-mole in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Hit the mole as many times as you can before the clock runs out. Click a hole or press its number."
)]
pub struct Cli {
    /// number of holes the mole can pop out of (2-9)
    #[clap(short = 'n', long)]
    slots: Option<usize>,

    /// length of a round in seconds
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// read settings from this file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// seed the mole's movement for a reproducible game
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// File settings with command line overrides applied
    fn resolve_config(&self, store: &impl ConfigStore) -> Config {
        store.load().with_overrides(self.slots, self.secs)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        // logging is best effort; the game runs without it
        let _ = logging::init(&path);
    }

    let store = cli.config_store();
    let config = cli.resolve_config(&store);
    let settings = match GameSettings::try_from(&config) {
        Ok(settings) => settings,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e).exit();
        }
    };
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    let state = match cli.seed {
        Some(seed) => GameState::with_seed(settings, seed),
        None => GameState::new(settings),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(FRAME_RATE_MS)),
    );
    let mut app = App::new(state, runner.sender());
    let result = app::run(&mut terminal, &mut app, &runner);

    // restore the terminal before reporting any error
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["whack"]).unwrap();
        assert_eq!(cli.slots, None);
        assert_eq!(cli.secs, None);
        assert_eq!(cli.config, None);
        assert!(!cli.save_config);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from(["whack", "-n", "4", "-s", "30"]).unwrap();
        assert_eq!(cli.slots, Some(4));
        assert_eq!(cli.secs, Some(30));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::try_parse_from([
            "whack",
            "--slots",
            "9",
            "--secs",
            "5",
            "--config",
            "/tmp/w.json",
            "--save-config",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(cli.slots, Some(9));
        assert_eq!(cli.secs, Some(5));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.json")));
        assert!(cli.save_config);
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_cli_rejects_negative_secs() {
        assert!(Cli::try_parse_from(["whack", "-s", "-1"]).is_err());
    }

    #[test]
    fn test_resolve_config_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        store
            .save(&Config {
                slots: 3,
                round_secs: 20,
            })
            .unwrap();

        let cli = Cli::try_parse_from(["whack", "-s", "10"]).unwrap();
        let cfg = cli.resolve_config(&store);
        assert_eq!(cfg.slots, 3);
        assert_eq!(cfg.round_secs, 10);
    }

    #[test]
    fn test_config_store_uses_cli_path() {
        let cli = Cli::try_parse_from(["whack", "-c", "/tmp/elsewhere.json"]).unwrap();
        assert_eq!(
            cli.config_store().path(),
            PathBuf::from("/tmp/elsewhere.json").as_path()
        );
    }

    #[test]
    fn test_frame_rate_constant() {
        assert_eq!(FRAME_RATE_MS, 100);
    }
}
