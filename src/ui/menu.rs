use super::theme::Theme;
use crate::state::NEW_MENU_ITEMS;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const MENU_WIDTH: u16 = 26;

/// Render the New popup menu centered on the screen
///
/// Returns the popup area for mouse hit testing.
pub fn render(frame: &mut Frame, screen: Rect, selected_row: usize, theme: &Theme) -> Rect {
    let height = NEW_MENU_ITEMS.len() as u16 + 2;
    let width = MENU_WIDTH.min(screen.width);
    let x = screen.x + screen.width.saturating_sub(width) / 2;
    let y = screen.y + screen.height.saturating_sub(height) / 2;
    let area = Rect::new(x, y, width, height.min(screen.height));

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg))
        .title(" New ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (row, item) in NEW_MENU_ITEMS.iter().enumerate() {
        let style = if row == selected_row {
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg).bg(theme.popup_bg)
        };
        let padded = format!(" {:<width$}", item, width = inner.width.saturating_sub(1) as usize);
        lines.push(Line::from(Span::styled(padded, style)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
    area
}

/// Find the menu row under a click position
pub fn row_at(area: Rect, x: u16, y: u16) -> Option<usize> {
    let inner_x = area.x + 1;
    let inner_y = area.y + 1;
    let inner_width = area.width.saturating_sub(2);
    let rows = NEW_MENU_ITEMS.len() as u16;

    if x < inner_x || x >= inner_x + inner_width || y < inner_y || y >= inner_y + rows {
        return None;
    }
    Some((y - inner_y) as usize)
}

/// Check whether a click position falls inside the popup
pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
