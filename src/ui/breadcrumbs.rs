use super::theme::Theme;
use crate::model::{Crumb, NodeId};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " › ";

/// Render the breadcrumb trail and return a click rect per crumb
///
/// The trail always starts at the root; the last crumb is the current
/// folder. Crumbs that do not fit the row are drawn clipped and get no
/// click rect.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    trail: &[Crumb],
    theme: &Theme,
) -> Vec<(Rect, NodeId)> {
    let mut spans = vec![Span::styled(" ", Style::default().bg(theme.bg))];
    let mut hits = Vec::new();
    let mut x = area.x + 1;

    for (index, crumb) in trail.iter().enumerate() {
        let is_last = index + 1 == trail.len();
        let style = if is_last {
            Style::default()
                .fg(theme.accent)
                .bg(theme.bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg).bg(theme.bg)
        };

        let crumb_width = crumb.name.width() as u16;
        if x + crumb_width <= area.x + area.width {
            hits.push((Rect::new(x, area.y, crumb_width, 1), crumb.id.clone()));
        }
        spans.push(Span::styled(crumb.name.clone(), style));
        x = x.saturating_add(crumb_width);

        if !is_last {
            spans.push(Span::styled(
                SEPARATOR,
                Style::default().fg(theme.muted).bg(theme.bg),
            ));
            x = x.saturating_add(SEPARATOR.width() as u16);
        }
    }

    let used: usize = spans.iter().map(|span| span.width()).sum();
    let width = area.width as usize;
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(theme.bg),
        ));
    }

    frame.render_widget(Paragraph::new(vec![Line::from(spans)]), area);
    hits
}

/// Find the crumb under a click position
pub fn crumb_at(hits: &[(Rect, NodeId)], x: u16, y: u16) -> Option<&NodeId> {
    hits.iter()
        .find(|(rect, _)| {
            x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
        })
        .map(|(_, id)| id)
}
