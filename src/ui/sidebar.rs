use super::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Clickable sidebar entries
///
/// Starred and Trash are placeholders from the demo data set; activating
/// them only surfaces an acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    New,
    MyDrive,
    Starred,
    Trash,
}

/// Fixed storage footer of the demo account
const STORAGE_USED: &str = "5.2 GB used";
const ACCOUNT_NAME: &str = "John Doe";

/// Render the sidebar and return a click rect per entry
pub fn render(
    frame: &mut Frame,
    area: Rect,
    at_root: bool,
    theme: &Theme,
) -> Vec<(Rect, SidebarItem)> {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < 12 || inner.height < 6 {
        return Vec::new();
    }

    let width = inner.width as usize;
    let pad = |text: &str| {
        let mut line = format!(" {}", text);
        while line.width() < width {
            line.push(' ');
        }
        line
    };

    let button_style = Style::default()
        .fg(theme.accent)
        .bg(theme.bg)
        .add_modifier(Modifier::BOLD);
    let item_style = Style::default().fg(theme.fg).bg(theme.bg);
    let active_style = Style::default()
        .fg(theme.accent)
        .bg(theme.bg)
        .add_modifier(Modifier::BOLD);
    let muted_style = Style::default().fg(theme.muted).bg(theme.bg);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(pad("[ + New ]"), button_style))];
    lines.push(Line::from(Span::styled(pad(""), item_style)));
    lines.push(Line::from(Span::styled(
        pad("📁 My Drive"),
        if at_root { active_style } else { item_style },
    )));
    lines.push(Line::from(Span::styled(pad("⭐ Starred"), item_style)));
    lines.push(Line::from(Span::styled(pad("🗑 Trash"), item_style)));

    // Storage footer pinned to the bottom rows.
    let height = inner.height as usize;
    while lines.len() < height.saturating_sub(3) {
        lines.push(Line::from(Span::styled(pad(""), item_style)));
    }
    if lines.len() < height {
        lines.push(Line::from(Span::styled(pad(ACCOUNT_NAME), item_style)));
    }
    if lines.len() < height {
        let filled = width.saturating_sub(2) / 3;
        let empty = width.saturating_sub(2) - filled;
        let bar = format!(" {}{}", "▓".repeat(filled), "░".repeat(empty));
        lines.push(Line::from(vec![
            Span::styled(bar, Style::default().fg(theme.accent).bg(theme.bg)),
        ]));
    }
    if lines.len() < height {
        lines.push(Line::from(Span::styled(pad(STORAGE_USED), muted_style)));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
    vec![
        (row(0), SidebarItem::New),
        (row(2), SidebarItem::MyDrive),
        (row(3), SidebarItem::Starred),
        (row(4), SidebarItem::Trash),
    ]
}

/// Find the sidebar entry under a click position
pub fn item_at(hits: &[(Rect, SidebarItem)], x: u16, y: u16) -> Option<SidebarItem> {
    hits.iter()
        .find(|(rect, _)| {
            x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
        })
        .map(|(_, item)| *item)
}
