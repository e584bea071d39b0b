use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::Session;
use crate::audio::AudioBackend;
use crate::config::UiSettings;

use super::time_text;

pub(super) fn render<B: AudioBackend>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<B>,
    ui: &UiSettings,
) {
    let block = Block::default().borders(Borders::ALL).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let player = &session.player;
    let track = player
        .current_track_id()
        .and_then(|id| session.playlist.position_of(id))
        .and_then(|i| session.playlist.get(i));
    let Some(track) = track else {
        let idle = Paragraph::new("Nothing playing. Pick a song in the playlist view.")
            .alignment(Alignment::Center);
        frame.render_widget(idle, inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let title = Paragraph::new(track.display_name.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, rows[0]);

    let state = Paragraph::new(player.state().label()).alignment(Alignment::Center);
    frame.render_widget(state, rows[1]);

    let label = time_text(player.elapsed(), player.duration(), ui).unwrap_or_default();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(player.progress())
        .label(label);
    frame.render_widget(gauge, rows[3]);
}
