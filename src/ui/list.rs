use super::icons;
use super::theme::Theme;
use crate::model::Node;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const SIZE_COL_WIDTH: usize = 10;
const DATE_COL_WIDTH: usize = 14;

/// Placeholder shown for absent size/modified metadata
pub const METADATA_PLACEHOLDER: &str = "—";

/// Layout information for mouse hit testing in list view
#[derive(Debug, Clone, Default)]
pub struct ListLayout {
    /// Area holding the entry rows (headers excluded)
    pub rows_area: Rect,
    /// Index of the first visible entry
    pub scroll_offset: usize,
}

impl ListLayout {
    /// Convert a click position to an entry index
    pub fn entry_at(&self, x: u16, y: u16, entry_count: usize) -> Option<usize> {
        if x < self.rows_area.x
            || x >= self.rows_area.x + self.rows_area.width
            || y < self.rows_area.y
            || y >= self.rows_area.y + self.rows_area.height
        {
            return None;
        }
        let index = self.scroll_offset + (y - self.rows_area.y) as usize;
        (index < entry_count).then_some(index)
    }
}

/// Render folder entries as rows with name, size and modified columns
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[&Node],
    selected: usize,
    theme: &Theme,
) -> ListLayout {
    if area.height < 2 || (area.width as usize) < SIZE_COL_WIDTH + DATE_COL_WIDTH + 8 {
        return ListLayout::default();
    }

    let width = area.width as usize;
    let name_col_width = width.saturating_sub(SIZE_COL_WIDTH + DATE_COL_WIDTH + 4);

    let header_area = Rect::new(area.x, area.y, area.width, 1);
    let rows_area = Rect::new(area.x, area.y + 1, area.width, area.height - 1);

    render_header(frame, header_area, name_col_width, theme);

    if entries.is_empty() {
        let empty_line = Line::from(Span::styled(
            " This folder is empty",
            Style::default().fg(theme.muted).bg(theme.bg),
        ));
        frame.render_widget(Paragraph::new(vec![empty_line]), rows_area);
        return ListLayout {
            rows_area,
            scroll_offset: 0,
        };
    }

    let visible_rows = rows_area.height as usize;
    let scroll_offset = if selected >= visible_rows {
        selected + 1 - visible_rows
    } else {
        0
    };

    let mut lines = Vec::new();
    for (row, entry) in entries.iter().skip(scroll_offset).take(visible_rows).enumerate() {
        let index = scroll_offset + row;
        lines.push(entry_line(
            entry,
            index == selected,
            width,
            name_col_width,
            theme,
        ));
    }

    // Fill remaining rows so the background stays uniform.
    while lines.len() < visible_rows {
        lines.push(Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(theme.bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines), rows_area);

    ListLayout {
        rows_area,
        scroll_offset,
    }
}

fn render_header(frame: &mut Frame, area: Rect, name_col_width: usize, theme: &Theme) {
    let header_style = Style::default()
        .fg(theme.muted)
        .bg(theme.bg)
        .add_modifier(Modifier::BOLD);

    let spans = vec![
        Span::styled(
            format!(" {:<width$}", "Name", width = name_col_width.saturating_sub(1)),
            header_style,
        ),
        Span::styled(
            format!("{:>width$}", "Size", width = SIZE_COL_WIDTH),
            header_style,
        ),
        Span::styled("  ", header_style),
        Span::styled(
            format!("{:>width$}", "Modified", width = DATE_COL_WIDTH),
            header_style,
        ),
    ];

    frame.render_widget(Paragraph::new(vec![Line::from(spans)]), area);
}

fn entry_line(
    entry: &Node,
    is_selected: bool,
    width: usize,
    name_col_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let base_style = if is_selected {
        Style::default().fg(theme.selection_fg).bg(theme.selection_bg)
    } else {
        Style::default().fg(theme.fg).bg(theme.bg)
    };

    let icon = icons::icon(entry.kind);
    let icon_style = if is_selected {
        base_style
    } else {
        base_style.fg(icons::color(entry.kind))
    };

    // Pad the name so the size column lines up regardless of icon width.
    let name_width = name_col_width.saturating_sub(1 + icon.width());
    let name_display = pad_or_truncate(&entry.name, name_width);
    let name_style = if entry.is_folder() && !is_selected {
        base_style.fg(theme.accent)
    } else {
        base_style
    };

    let size_display = format!(
        "{:>width$}",
        entry.size.as_deref().unwrap_or(METADATA_PLACEHOLDER),
        width = SIZE_COL_WIDTH
    );
    let modified_display = format!(
        "{:>width$}",
        entry.modified.as_deref().unwrap_or(METADATA_PLACEHOLDER),
        width = DATE_COL_WIDTH
    );
    let metadata_style = if is_selected {
        base_style
    } else {
        base_style.fg(theme.muted)
    };

    let mut spans = vec![
        Span::styled(" ", base_style),
        Span::styled(icon, icon_style),
        Span::styled(name_display, name_style),
        Span::styled(size_display, metadata_style),
        Span::styled("  ", base_style),
        Span::styled(modified_display, metadata_style),
    ];

    // Pad the tail so selection covers the whole row.
    let used: usize = spans.iter().map(|span| span.width()).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), base_style));
    }

    Line::from(spans)
}

/// Left-align a string into the given display width, truncating with an
/// ellipsis when it does not fit
fn pad_or_truncate(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{}{}", text, " ".repeat(padding));
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
    let out_width = out.width();
    if out_width < width {
        out.push_str(&" ".repeat(width - out_width));
    }
    out
}
