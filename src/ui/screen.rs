use super::breadcrumbs;
use super::grid::{self, GridLayout};
use super::list::{self, ListLayout};
use super::menu;
use super::sidebar::{self, SidebarItem};
use super::theme::Theme;
use crate::model::{Drive, Node, NodeId};
use crate::state::{BrowserState, ViewMode};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const SIDEBAR_WIDTH: u16 = 22;
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 10;

const GRID_BUTTON: &str = " ▦ Grid ";
const LIST_BUTTON: &str = " ≡ List ";
const UPLOAD_BUTTON: &str = "[ Upload ]";
const NEW_BUTTON: &str = "[ + New ]";

const KEY_HINTS: &str = "enter open · bksp up · v view · u upload · n new · t theme · q quit";

/// Entry hit testing for whichever view was rendered
#[derive(Debug, Clone, Default)]
pub enum EntriesLayout {
    #[default]
    None,
    Grid(GridLayout),
    List(ListLayout),
}

impl EntriesLayout {
    fn entry_at(&self, x: u16, y: u16, entry_count: usize) -> Option<usize> {
        match self {
            EntriesLayout::None => None,
            EntriesLayout::Grid(layout) => layout.entry_at(x, y, entry_count),
            EntriesLayout::List(layout) => layout.entry_at(x, y, entry_count),
        }
    }

    /// Tile columns of the rendered view; list rows count as one column
    pub fn columns(&self) -> usize {
        match self {
            EntriesLayout::Grid(layout) => layout.columns.max(1),
            _ => 1,
        }
    }
}

/// Everything mouse handling needs to know about the last rendered frame
#[derive(Debug, Clone, Default)]
pub struct ScreenLayout {
    /// Folder whose entries were actually rendered (unknown current ids
    /// fall back to the root)
    pub view_folder_id: Option<NodeId>,
    /// Number of entries rendered
    pub entry_count: usize,
    pub entries: EntriesLayout,
    pub crumbs: Vec<(Rect, NodeId)>,
    pub sidebar: Vec<(Rect, SidebarItem)>,
    pub grid_button: Rect,
    pub list_button: Rect,
    pub upload_button: Rect,
    pub new_button: Rect,
    /// Popup area while the New menu is open
    pub menu_area: Option<Rect>,
}

impl ScreenLayout {
    pub fn entry_at(&self, x: u16, y: u16) -> Option<usize> {
        self.entries.entry_at(x, y, self.entry_count)
    }

    pub fn crumb_at(&self, x: u16, y: u16) -> Option<&NodeId> {
        breadcrumbs::crumb_at(&self.crumbs, x, y)
    }

    pub fn sidebar_at(&self, x: u16, y: u16) -> Option<SidebarItem> {
        sidebar::item_at(&self.sidebar, x, y)
    }

    pub fn menu_row_at(&self, x: u16, y: u16) -> Option<usize> {
        self.menu_area.and_then(|area| menu::row_at(area, x, y))
    }

    pub fn in_menu(&self, x: u16, y: u16) -> bool {
        self.menu_area
            .map(|area| menu::contains(area, x, y))
            .unwrap_or(false)
    }
}

/// Check whether a position falls inside a rect
pub fn hit(rect: Rect, x: u16, y: u16) -> bool {
    rect.width > 0
        && rect.height > 0
        && x >= rect.x
        && x < rect.x + rect.width
        && y >= rect.y
        && y < rect.y + rect.height
}

/// Resolve the folder node the view should show
///
/// Unknown current ids fall back to the root, so the browser never shows
/// an error screen for a dangling reference.
pub fn resolve_view_folder<'a>(drive: &'a Drive, current: &NodeId) -> &'a Node {
    drive.get(current).unwrap_or_else(|| drive.root())
}

/// Render the whole screen and return the layout for hit testing
pub fn render(
    frame: &mut Frame,
    drive: &Drive,
    state: &BrowserState,
    theme: &Theme,
    show_sidebar: bool,
    status: Option<&str>,
) -> ScreenLayout {
    let area = frame.area();

    // Paint the background first so every region sits on theme colors.
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        area,
    );

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(theme.muted).bg(theme.bg),
            ))),
            area,
        );
        return ScreenLayout::default();
    }

    let mut layout = ScreenLayout::default();

    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area, state.view_mode, theme, &mut layout);

    let content_area = if show_sidebar && body_area.width > SIDEBAR_WIDTH + MIN_WIDTH {
        let [sidebar_area, content_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(body_area);
        let at_root = &state.current_folder_id == drive.root_id();
        layout.sidebar = sidebar::render(frame, sidebar_area, at_root, theme);
        content_area
    } else {
        body_area
    };

    let [crumb_area, action_area, entries_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(content_area);

    let trail = drive.breadcrumbs(&state.current_folder_id);
    layout.crumbs = breadcrumbs::render(frame, crumb_area, &trail, theme);

    let folder = resolve_view_folder(drive, &state.current_folder_id);
    let entries = drive.entries_of(&folder.id);
    layout.view_folder_id = Some(folder.id.clone());
    layout.entry_count = entries.len();

    render_action_bar(frame, action_area, entries.len(), theme, &mut layout);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg))
        .title(Span::styled(
            format!(" {} ", folder.name),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ));
    let entries_inner = block.inner(entries_area);
    frame.render_widget(block, entries_area);

    layout.entries = match state.view_mode {
        ViewMode::Grid => EntriesLayout::Grid(grid::render(
            frame,
            entries_inner,
            &entries,
            state.selected,
            theme,
        )),
        ViewMode::List => EntriesLayout::List(list::render(
            frame,
            entries_inner,
            &entries,
            state.selected,
            theme,
        )),
    };

    render_status_bar(frame, status_area, status, theme);

    if let Some(menu_row) = state.menu {
        layout.menu_area = Some(menu::render(frame, area, menu_row, theme));
    }

    layout
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    view_mode: ViewMode,
    theme: &Theme,
    layout: &mut ScreenLayout,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg))
        .title(Span::styled(
            " Drive ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let grid_width = GRID_BUTTON.width() as u16;
    let list_width = LIST_BUTTON.width() as u16;
    let buttons_width = grid_width + list_width + 1;

    // Pad by display width; the magnifier glyph is two cells wide.
    let search_width = (inner.width.saturating_sub(buttons_width)) as usize;
    let mut search_display = String::from(" 🔍 Search in Drive");
    while search_display.width() < search_width {
        search_display.push(' ');
    }

    let grid_style = toggle_style(view_mode == ViewMode::Grid, theme);
    let list_style = toggle_style(view_mode == ViewMode::List, theme);

    let line = Line::from(vec![
        Span::styled(search_display, Style::default().fg(theme.muted).bg(theme.bg)),
        Span::styled(GRID_BUTTON, grid_style),
        Span::styled(" ", Style::default().bg(theme.bg)),
        Span::styled(LIST_BUTTON, list_style),
    ]);
    frame.render_widget(Paragraph::new(vec![line]), inner);

    let list_x = inner.x + inner.width.saturating_sub(list_width);
    let grid_x = list_x.saturating_sub(grid_width + 1);
    layout.grid_button = Rect::new(grid_x, inner.y, grid_width, 1);
    layout.list_button = Rect::new(list_x, inner.y, list_width, 1);
}

fn toggle_style(active: bool, theme: &Theme) -> Style {
    if active {
        Style::default()
            .fg(theme.accent)
            .bg(theme.bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted).bg(theme.bg)
    }
}

fn render_action_bar(
    frame: &mut Frame,
    area: Rect,
    entry_count: usize,
    theme: &Theme,
    layout: &mut ScreenLayout,
) {
    let upload_width = UPLOAD_BUTTON.width() as u16;
    let new_width = NEW_BUTTON.width() as u16;
    let buttons_width = upload_width + new_width + 2;

    let count_label = if entry_count == 1 {
        " 1 item".to_string()
    } else {
        format!(" {} items", entry_count)
    };
    let count_width = (area.width.saturating_sub(buttons_width)) as usize;
    let count_display = format!("{:<width$}", count_label, width = count_width);

    let button_style = Style::default()
        .fg(theme.accent)
        .bg(theme.bg)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(count_display, Style::default().fg(theme.muted).bg(theme.bg)),
        Span::styled(UPLOAD_BUTTON, button_style),
        Span::styled(" ", Style::default().bg(theme.bg)),
        Span::styled(NEW_BUTTON, button_style),
        Span::styled(" ", Style::default().bg(theme.bg)),
    ]);
    frame.render_widget(Paragraph::new(vec![line]), area);

    let new_x = area.x + area.width.saturating_sub(new_width + 1);
    let upload_x = new_x.saturating_sub(upload_width + 1);
    layout.upload_button = Rect::new(upload_x, area.y, upload_width, 1);
    layout.new_button = Rect::new(new_x, area.y, new_width, 1);
}

fn render_status_bar(frame: &mut Frame, area: Rect, status: Option<&str>, theme: &Theme) {
    let (text, text_style) = match status {
        Some(message) => (
            format!(" {}", message),
            Style::default()
                .fg(theme.status_fg)
                .bg(theme.status_bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            format!(" {}", KEY_HINTS),
            Style::default().fg(theme.status_fg).bg(theme.status_bg),
        ),
    };

    let theme_label = format!("{} ", theme.name);
    let text_width = (area.width as usize).saturating_sub(theme_label.width());
    let text_display = format!("{:<width$}", text, width = text_width);

    let line = Line::from(vec![
        Span::styled(text_display, text_style),
        Span::styled(
            theme_label,
            Style::default().fg(theme.status_fg).bg(theme.status_bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(vec![line]), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixture::sample_drive;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_screen(
        state: &BrowserState,
        width: u16,
        height: u16,
        status: Option<&str>,
    ) -> (String, ScreenLayout) {
        let drive = sample_drive().unwrap();
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|frame| {
                layout = render(frame, &drive, state, &Theme::dark(), true, status);
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

    fn state_at(folder: &str, view_mode: ViewMode) -> BrowserState {
        let drive = sample_drive().unwrap();
        let mut state = BrowserState::new(&drive, view_mode);
        state.current_folder_id = NodeId::from(folder);
        state
    }

    #[test]
    fn test_full_screen_has_all_regions() {
        let state = state_at("root", ViewMode::Grid);
        let (text, layout) = render_screen(&state, 100, 24, None);

        assert!(text.contains("Drive"));
        assert!(text.contains("Search in Drive"));
        assert!(text.contains("My Drive"));
        assert!(text.contains("Upload"));
        assert!(text.contains("+ New"));
        assert!(text.contains("5 items"));
        assert!(text.contains("q quit"));
        assert_eq!(layout.entry_count, 5);
        assert_eq!(layout.view_folder_id, Some(NodeId::from("root")));
        assert!(!layout.sidebar.is_empty());
        assert!(layout.grid_button.width > 0);
    }

    #[test]
    fn test_list_view_renders_columns() {
        let state = state_at("documents", ViewMode::List);
        let (text, layout) = render_screen(&state, 100, 24, None);

        assert!(text.contains("Documents"));
        assert!(text.contains("Resume.docx"));
        assert!(text.contains("245 KB"));
        assert!(matches!(layout.entries, EntriesLayout::List(_)));
    }

    #[test]
    fn test_unknown_folder_falls_back_to_root_view() {
        let state = state_at("ghost", ViewMode::Grid);
        let (text, layout) = render_screen(&state, 100, 24, None);

        assert_eq!(layout.view_folder_id, Some(NodeId::from("root")));
        assert_eq!(layout.entry_count, 5);
        // The trail degrades to the root alone.
        assert_eq!(layout.crumbs.len(), 1);
        assert!(text.contains("Documents"));
    }

    #[test]
    fn test_empty_folder_shows_hint() {
        let state = state_at("project2", ViewMode::Grid);
        let (text, layout) = render_screen(&state, 100, 24, None);

        assert_eq!(layout.entry_count, 0);
        assert!(text.contains("This folder is empty"));
        assert!(text.contains("0 items"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let state = state_at("root", ViewMode::Grid);
        let (text, _) = render_screen(&state, 100, 24, Some("Upload is not available"));

        assert!(text.contains("Upload is not available"));
        assert!(!text.contains("q quit"));
    }

    #[test]
    fn test_menu_renders_on_top() {
        let mut state = state_at("root", ViewMode::Grid);
        state.menu = Some(1);
        let (text, layout) = render_screen(&state, 100, 24, None);

        assert!(layout.menu_area.is_some());
        assert!(text.contains("New Document"));
    }

    #[test]
    fn test_too_small_terminal_degrades() {
        let state = state_at("root", ViewMode::Grid);
        let (text, layout) = render_screen(&state, 30, 6, None);

        assert!(text.contains("Terminal too small"));
        assert_eq!(layout.entry_count, 0);
        assert!(layout.view_folder_id.is_none());
        assert_eq!(layout.entry_at(5, 5), None);
    }

    #[test]
    fn test_button_hit_rects_align_with_render() {
        let state = state_at("root", ViewMode::Grid);
        let (text, layout) = render_screen(&state, 100, 24, None);

        // The grid toggle sits left of the list toggle on the header row.
        assert!(layout.grid_button.x < layout.list_button.x);
        assert_eq!(layout.grid_button.y, layout.list_button.y);
        assert!(hit(layout.grid_button, layout.grid_button.x, layout.grid_button.y));
        assert!(!hit(layout.grid_button, layout.list_button.x, layout.list_button.y));

        // The rendered toggle glyph lands inside its hit rect even though
        // the search placeholder holds a double-width glyph.
        let rows: Vec<&str> = text.lines().collect();
        let header_row = rows[layout.grid_button.y as usize];
        let glyph_col = header_row.chars().position(|ch| ch == '▦').unwrap() as u16;
        assert_eq!(glyph_col, layout.grid_button.x + 1);

        // Upload precedes New on the action row.
        assert!(layout.upload_button.x < layout.new_button.x);
        assert!(text.contains("Grid"));
        assert!(text.contains("List"));
    }
}
