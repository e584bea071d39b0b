use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, Effect, Notice, Session};
use crate::audio::AudioBackend;
use crate::config;
use crate::library::{ScanReply, ScanWorker};
use crate::persist::{PersistReply, PersistRequest, PersistWorker};
use crate::ui;

use super::keys::{KeyState, map_key};

/// The background threads the loop hands slow work to.
pub struct Workers {
    pub persist: PersistWorker,
    pub scan: ScanWorker,
}

/// Main terminal event loop: pumps audio, collects finished background jobs,
/// draws, and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session<B>,
    workers: &Workers,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut keys = KeyState::default();

    while !session.should_quit() {
        session.dispatch(Action::Tick);

        while let Some(reply) = workers.persist.try_recv() {
            let action = match reply {
                PersistReply::Written { result, .. } => Action::SaveFinished(result),
                PersistReply::Read { result, .. } => Action::LoadFinished(result),
            };
            apply(session, workers, action);
        }
        while let Some(ScanReply { path, files }) = workers.scan.try_recv() {
            apply(session, workers, Action::ScanFinished { path, files });
        }

        terminal.draw(|f| ui::draw(f, session, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = map_key(key, &session.input, session.scrub_seconds(), &mut keys) {
                    apply(session, workers, action);
                }
            }
        }
    }

    log::info!("shutting down");
    Ok(())
}

/// Dispatch `action` and hand any resulting effect to its worker.
fn apply<B: AudioBackend>(session: &mut Session<B>, workers: &Workers, action: Action) {
    let Some(effect) = session.dispatch(action) else {
        return;
    };
    let submitted = match effect {
        Effect::WriteDocument { path, content } => workers
            .persist
            .submit(PersistRequest::Write { path, content })
            .map_err(|e| e.to_string()),
        Effect::ReadDocument { path } => workers
            .persist
            .submit(PersistRequest::Read { path })
            .map_err(|e| e.to_string()),
        Effect::ScanPath { path } => workers.scan.submit(path).map_err(|e| e.to_string()),
    };
    if let Err(msg) = submitted {
        session.set_notice(Notice::error(msg));
    }
}
