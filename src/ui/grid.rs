use super::icons;
use super::theme::Theme;
use crate::model::Node;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Tile content width in cells
const TILE_WIDTH: usize = 18;
/// Horizontal gap between tiles
const TILE_GAP: usize = 1;
/// Rows per tile: icon line and name line
const TILE_CONTENT_HEIGHT: usize = 2;
/// Blank rows between tile rows
const TILE_ROW_GAP: usize = 1;

const TILE_STRIDE_X: usize = TILE_WIDTH + TILE_GAP;
const TILE_STRIDE_Y: usize = TILE_CONTENT_HEIGHT + TILE_ROW_GAP;

/// Layout information for mouse hit testing in grid view
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    /// Area the tiles were drawn into
    pub tiles_area: Rect,
    /// Number of tile columns
    pub columns: usize,
    /// Number of tile rows scrolled off the top
    pub scroll_rows: usize,
}

impl GridLayout {
    /// Convert a click position to an entry index
    pub fn entry_at(&self, x: u16, y: u16, entry_count: usize) -> Option<usize> {
        if self.columns == 0
            || x < self.tiles_area.x
            || x >= self.tiles_area.x + self.tiles_area.width
            || y < self.tiles_area.y
            || y >= self.tiles_area.y + self.tiles_area.height
        {
            return None;
        }

        let rel_x = (x - self.tiles_area.x) as usize;
        let rel_y = (y - self.tiles_area.y) as usize;

        let column = rel_x / TILE_STRIDE_X;
        if column >= self.columns || rel_x % TILE_STRIDE_X >= TILE_WIDTH {
            return None;
        }
        if rel_y % TILE_STRIDE_Y >= TILE_CONTENT_HEIGHT {
            return None;
        }

        let row = rel_y / TILE_STRIDE_Y + self.scroll_rows;
        let index = row * self.columns + column;
        (index < entry_count).then_some(index)
    }
}

/// Render folder entries as a grid of icon tiles
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[&Node],
    selected: usize,
    theme: &Theme,
) -> GridLayout {
    if area.height < TILE_CONTENT_HEIGHT as u16 || (area.width as usize) < TILE_WIDTH {
        return GridLayout::default();
    }

    if entries.is_empty() {
        let empty_line = Line::from(Span::styled(
            " This folder is empty",
            Style::default().fg(theme.muted).bg(theme.bg),
        ));
        frame.render_widget(Paragraph::new(vec![empty_line]), area);
        return GridLayout {
            tiles_area: area,
            columns: 0,
            scroll_rows: 0,
        };
    }

    let width = area.width as usize;
    let columns = ((width + TILE_GAP) / TILE_STRIDE_X).max(1);
    let total_rows = entries.len().div_ceil(columns);
    let visible_rows = ((area.height as usize + TILE_ROW_GAP) / TILE_STRIDE_Y).max(1);

    let selected_row = selected / columns;
    let scroll_rows = if selected_row >= visible_rows {
        selected_row + 1 - visible_rows
    } else {
        0
    };

    let mut lines = Vec::new();
    for row in scroll_rows..(scroll_rows + visible_rows).min(total_rows) {
        let row_entries = &entries[row * columns..((row + 1) * columns).min(entries.len())];

        let mut icon_spans = Vec::new();
        let mut name_spans = Vec::new();
        for (column, entry) in row_entries.iter().enumerate() {
            let index = row * columns + column;
            let is_selected = index == selected;

            let base_style = if is_selected {
                Style::default().fg(theme.selection_fg).bg(theme.selection_bg)
            } else {
                Style::default().fg(theme.fg).bg(theme.bg)
            };
            let icon_style = if is_selected {
                base_style
            } else {
                base_style.fg(icons::color(entry.kind))
            };
            let name_style = if entry.is_folder() && !is_selected {
                base_style.fg(theme.accent)
            } else {
                base_style
            };

            icon_spans.push(Span::styled(
                center(icons::icon(entry.kind).trim_end(), TILE_WIDTH),
                icon_style,
            ));
            name_spans.push(Span::styled(
                center(&truncate(&entry.name, TILE_WIDTH - 2), TILE_WIDTH),
                name_style,
            ));

            if column + 1 < row_entries.len() {
                let gap = Span::styled(" ".repeat(TILE_GAP), Style::default().bg(theme.bg));
                icon_spans.push(gap.clone());
                name_spans.push(gap);
            }
        }

        lines.push(Line::from(icon_spans));
        lines.push(Line::from(name_spans));
        lines.push(Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(theme.bg),
        )));
    }

    // Fill the rest of the area so the background stays uniform.
    while lines.len() < area.height as usize {
        lines.push(Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(theme.bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);

    GridLayout {
        tiles_area: area,
        columns,
        scroll_rows,
    }
}

/// Center a string within the given display width
fn center(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Truncate a string to the given display width with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.to_string().width();
        if used + ch_width > width.saturating_sub(3) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixture::sample_drive;
    use crate::model::{Drive, NodeId};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(
        drive: &Drive,
        folder: &str,
        selected: usize,
        width: u16,
        height: u16,
    ) -> (String, GridLayout) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut layout = GridLayout::default();
        terminal
            .draw(|frame| {
                let entries = drive.entries_of(&NodeId::from(folder));
                let area = Rect::new(0, 0, width, height);
                layout = render(frame, area, &entries, selected, &Theme::dark());
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        (text, layout)
    }

    #[test]
    fn test_grid_shows_every_entry() {
        let drive = sample_drive().unwrap();
        let (text, layout) = render_to_text(&drive, "root", 0, 60, 9);

        assert_eq!(layout.columns, 3);
        assert!(text.contains("Documents"));
        assert!(text.contains("Images"));
        assert!(text.contains("Projects"));
        // Names wider than a tile are shortened.
        assert!(text.contains("Presentation...."));
        assert!(text.contains("Important Not..."));
    }

    #[test]
    fn test_empty_folder_renders_zero_tiles() {
        let drive = sample_drive().unwrap();
        let (text, layout) = render_to_text(&drive, "project2", 0, 60, 9);

        assert!(text.contains("This folder is empty"));
        assert_eq!(layout.columns, 0);
        assert_eq!(layout.entry_at(5, 1, 0), None);
    }

    #[test]
    fn test_click_maps_to_tile() {
        let drive = sample_drive().unwrap();
        let (_, layout) = render_to_text(&drive, "root", 0, 60, 9);

        // First tile spans the first two rows.
        assert_eq!(layout.entry_at(0, 0, 5), Some(0));
        assert_eq!(layout.entry_at(17, 1, 5), Some(0));
        // The gap column hits nothing.
        assert_eq!(layout.entry_at(18, 0, 5), None);
        // Second tile of the first row.
        assert_eq!(layout.entry_at(19, 0, 5), Some(1));
        // Second row of tiles starts after the spacer line.
        assert_eq!(layout.entry_at(0, 3, 5), Some(3));
        // The spacer line hits nothing.
        assert_eq!(layout.entry_at(0, 2, 5), None);
        // Beyond the last entry hits nothing.
        assert_eq!(layout.entry_at(19, 3, 5), Some(4));
        assert_eq!(layout.entry_at(39, 3, 5), None);
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let drive = sample_drive().unwrap();
        // Height for a single tile row; selecting the last entry must
        // scroll its row into view.
        let (text, layout) = render_to_text(&drive, "root", 4, 60, 3);

        assert!(layout.scroll_rows > 0);
        assert!(text.contains("Important Not..."));
    }

    #[test]
    fn test_center_and_truncate() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(truncate("a-very-long-name", 8), "a-ver...");
        assert_eq!(truncate("short", 8), "short");
    }
}
