use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Session;
use crate::audio::RodioBackend;
use crate::library::ScanWorker;
use crate::persist::{DirStorage, PersistWorker};

mod event_loop;
mod keys;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    let log_file = settings.log_file();
    if let Err(e) = logging::init(&settings.logging, &log_file) {
        eprintln!("songbox: cannot log to {}: {e}", log_file.display());
    }
    if let Some(msg) = config_warning {
        log::warn!("{msg}");
    }

    let backend = RodioBackend::open_default()?;
    let mut session = Session::new(backend, &settings);

    let args: Vec<String> = env::args().skip(1).collect();
    startup::import_args(&mut session, &args);

    let storage = DirStorage::new(settings.data_dir());
    log::info!("storage: {}", storage.root().display());
    let workers = event_loop::Workers {
        persist: PersistWorker::spawn(storage),
        scan: ScanWorker::spawn(settings.library.clone()),
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut session, &workers);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
