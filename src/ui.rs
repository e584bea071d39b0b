//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a pure function of the `Session`: rendering reads state
//! and never changes it.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Tabs, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{InputMode, NoticeKind, Session, View};
use crate::audio::AudioBackend;
use crate::config::{TimeField, UiSettings};

mod now_playing;
mod playlist_view;


static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("tab", "switch view");
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("d", "remove");
    map.insert("a", "import");
    map.insert("w/o", "save/load");
    map.insert("space/p", "play/pause");
    map.insert("s", "stop");
    map.insert("h/l", "prev/next");
    // H/L is filled dynamically from config.
    map.insert("0-9", "seek 0-90%");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "tab", "j/k", "enter", "space/p", "s", "h/l", "H/L", "0-9", "a", "d", "w/o", "gg/G", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the time text (elapsed/total/remaining) per `UiSettings`.
fn time_text(elapsed: Duration, total: Option<Duration>, ui: &UiSettings) -> Option<String> {
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .filter_map(|f| match f {
            TimeField::Elapsed => Some(format_mmss(elapsed)),
            TimeField::Total => total.map(format_mmss),
            TimeField::Remaining => total.map(|t| format!("-{}", format_mmss(t.saturating_sub(elapsed)))),
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into `frame`.
pub fn draw<B: AudioBackend>(frame: &mut Frame, session: &Session<B>, ui: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header: title and view tabs.
    let selected_tab = match session.view {
        View::Playlist => 0,
        View::NowPlaying => 1,
    };
    let tabs = Tabs::new([View::Playlist.title(), View::NowPlaying.title()])
        .select(selected_tab)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(ui.header_text.as_str())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(tabs, chunks[0]);

    match session.view {
        View::Playlist => playlist_view::render(frame, chunks[1], session),
        View::NowPlaying => now_playing::render(frame, chunks[1], session, ui),
    }

    // Status line: the import prompt takes over while open.
    let status = match &session.input {
        InputMode::Import(buf) => Line::from(vec![
            Span::styled("Import path: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{buf}_")),
        ]),
        InputMode::Normal => match &session.notice {
            Some(n) => {
                let style = match n.kind {
                    NoticeKind::Info => Style::default(),
                    NoticeKind::Error => Style::default().fg(Color::Red),
                };
                Line::from(Span::styled(n.text.as_str(), style))
            }
            None => Line::from(format!(
                "{} • {} track(s)",
                session.player.state(),
                session.playlist.len()
            )),
        },
    };
    let status_par = Paragraph::new(status).block(Block::bordered().padding(left_pad()).title(" status "));
    frame.render_widget(status_par, chunks[2]);

    let footer = Paragraph::new(controls_text(session.scrub_seconds()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
