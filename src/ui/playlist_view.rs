use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::Session;
use crate::audio::AudioBackend;

pub(super) fn render<B: AudioBackend>(frame: &mut Frame, area: Rect, session: &Session<B>) {
    let block = Block::default().borders(Borders::ALL).title(" tracks ");

    if session.playlist.is_empty() && session.pending.is_empty() {
        let hint = Paragraph::new("No songs yet. Press [a] to import files.").block(block);
        frame.render_widget(hint, area);
        return;
    }

    let playing = session.player.current_index();
    let marker = if session.player.is_playing() { "▶ " } else { "‖ " };

    // Only build items for the visible window, keeping the cursor centered.
    let total = session.playlist.len();
    let height = area.height.saturating_sub(2) as usize;
    let sel = session.selected.min(total.saturating_sub(1));
    let (start, end) = if total <= height || height == 0 {
        (0, total)
    } else {
        let half = height / 2;
        let start = sel.saturating_sub(half).min(total - height);
        (start, start + height)
    };

    let mut items: Vec<ListItem> = session
        .playlist
        .iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(i, t)| {
            if playing == Some(i) {
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(t.display_name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                ]))
            } else {
                ListItem::new(format!("  {}", t.display_name))
            }
        })
        .collect();

    // Saved entries without audio yet trail the list, greyed out.
    if end == total {
        let room = height.saturating_sub(end - start);
        items.extend(session.pending.iter().take(room).map(|e| {
            ListItem::new(format!("  {} (not linked)", e.entry.display_name))
                .style(Style::default().fg(Color::DarkGray))
        }));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(sel - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
