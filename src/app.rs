//! Top-level application state and input dispatch
//!
//! `App` owns the drive table, the browser state, and the layout of the
//! last rendered frame. Raw terminal input is translated here into
//! `AppEvent`s; everything that is not browser state (status message,
//! theme, quit flag) lives on the `App` itself.

use crate::event::AppEvent;
use crate::model::{Drive, NodeId};
use crate::state::{BrowserState, ViewMode, NEW_MENU_ITEMS};
use crate::ui::screen::{self, ScreenLayout};
use crate::ui::sidebar::SidebarItem;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;

pub struct App {
    drive: Drive,
    state: BrowserState,
    theme: Theme,
    /// Layout of the last rendered frame, for mouse hit testing
    layout: ScreenLayout,
    status: Option<String>,
    show_sidebar: bool,
    should_quit: bool,
}

impl App {
    pub fn new(drive: Drive, view_mode: ViewMode, theme: Theme, show_sidebar: bool) -> Self {
        let state = BrowserState::new(&drive, view_mode);
        Self {
            drive,
            state,
            theme,
            layout: ScreenLayout::default(),
            status: None,
            show_sidebar,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Set a status bar message, replacing any previous one
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Render the screen and remember its layout for hit testing
    pub fn render(&mut self, frame: &mut Frame) {
        self.layout = screen::render(
            frame,
            &self.drive,
            &self.state,
            &self.theme,
            self.show_sidebar,
            self.status.as_deref(),
        );
    }

    fn apply(&mut self, event: AppEvent) {
        self.state.apply(&self.drive, &event);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        tracing::trace!("Key event: code={:?}, modifiers={:?}", code, modifiers);

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if self.state.menu_open() {
            self.handle_menu_key(code);
            return;
        }

        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.status = None,
            KeyCode::Up => self.move_selection(-(self.layout.entries.columns() as isize)),
            KeyCode::Down => self.move_selection(self.layout.entries.columns() as isize),
            KeyCode::Left => self.move_selection(-1),
            KeyCode::Right => self.move_selection(1),
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Backspace => self.navigate_up(),
            KeyCode::Char('v') => {
                self.apply(AppEvent::ToggleViewMode);
                tracing::debug!("View mode toggled to {:?}", self.state.view_mode);
            }
            KeyCode::Char('u') => self.trigger_upload(),
            KeyCode::Char('n') => self.apply(AppEvent::OpenNewMenu),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    /// Keys while the New popup menu is open; the menu is modal
    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('n') => self.apply(AppEvent::CloseNewMenu),
            KeyCode::Up => self.apply(AppEvent::MenuDelta(-1)),
            KeyCode::Down => self.apply(AppEvent::MenuDelta(1)),
            KeyCode::Enter => {
                if let Some(row) = self.state.menu {
                    self.choose_menu_item(row);
                }
            }
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    /// Handle a mouse event, returning true when a re-render is needed
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        tracing::trace!(
            "Mouse event: kind={:?}, column={}, row={}",
            event.kind,
            event.column,
            event.row
        );

        let (x, y) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            MouseEventKind::ScrollUp => {
                self.move_selection(-(self.layout.entries.columns() as isize));
                true
            }
            MouseEventKind::ScrollDown => {
                self.move_selection(self.layout.entries.columns() as isize);
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) -> bool {
        // While the menu is open it swallows every click; one outside
        // the popup closes it.
        if self.state.menu_open() {
            if let Some(row) = self.layout.menu_row_at(x, y) {
                self.choose_menu_item(row);
            } else if !self.layout.in_menu(x, y) {
                self.apply(AppEvent::CloseNewMenu);
            }
            return true;
        }

        if let Some(index) = self.layout.entry_at(x, y) {
            self.click_entry(index);
            return true;
        }

        if let Some(id) = self.layout.crumb_at(x, y).cloned() {
            tracing::info!("Breadcrumb click: {}", id);
            self.apply(AppEvent::Navigate(id));
            return true;
        }

        if let Some(item) = self.layout.sidebar_at(x, y) {
            self.click_sidebar(item);
            return true;
        }

        if screen::hit(self.layout.grid_button, x, y) {
            self.apply(AppEvent::SetViewMode(ViewMode::Grid));
            return true;
        }
        if screen::hit(self.layout.list_button, x, y) {
            self.apply(AppEvent::SetViewMode(ViewMode::List));
            return true;
        }
        if screen::hit(self.layout.upload_button, x, y) {
            self.trigger_upload();
            return true;
        }
        if screen::hit(self.layout.new_button, x, y) {
            self.apply(AppEvent::OpenNewMenu);
            return true;
        }

        false
    }

    /// A click on an entry: folders open, files only move the selection
    fn click_entry(&mut self, index: usize) {
        let target = self.entry_by_index(index);
        match target {
            Some((id, true)) => {
                tracing::info!("Opening folder {}", id);
                self.apply(AppEvent::Navigate(id));
            }
            Some((_, false)) => {
                let delta = index as isize - self.state.selected as isize;
                self.apply(AppEvent::SelectDelta(delta));
            }
            None => {}
        }
    }

    fn click_sidebar(&mut self, item: SidebarItem) {
        match item {
            SidebarItem::New => self.apply(AppEvent::OpenNewMenu),
            SidebarItem::MyDrive => {
                let root = self.drive.root_id().clone();
                self.apply(AppEvent::Navigate(root));
            }
            SidebarItem::Starred => self.set_status_message("Starred would be implemented here"),
            SidebarItem::Trash => self.set_status_message("Trash would be implemented here"),
        }
    }

    /// Open the selected entry: folders navigate, files do nothing
    fn activate_selected(&mut self) {
        let target = self.entry_by_index(self.state.selected);
        match target {
            Some((id, true)) => {
                tracing::info!("Opening folder {}", id);
                self.apply(AppEvent::Navigate(id));
            }
            Some((id, false)) => {
                tracing::debug!("Open ignored for file {}", id);
            }
            None => {}
        }
    }

    /// Look up an entry of the folder the last frame showed
    ///
    /// Returns the entry id and whether it is a folder. Uses the
    /// rendered folder, not the raw current id, so activation agrees
    /// with what is on screen when the current id is unresolvable.
    fn entry_by_index(&self, index: usize) -> Option<(NodeId, bool)> {
        let view_id = match &self.layout.view_folder_id {
            Some(id) => id,
            None => &screen::resolve_view_folder(&self.drive, &self.state.current_folder_id).id,
        };
        self.drive
            .entries_of(view_id)
            .get(index)
            .map(|node| (node.id.clone(), node.kind.is_folder()))
    }

    fn move_selection(&mut self, delta: isize) {
        if delta != 0 {
            self.apply(AppEvent::SelectDelta(delta));
        }
    }

    fn navigate_up(&mut self) {
        self.apply(AppEvent::NavigateUp);
        tracing::debug!("Navigated up to {}", self.state.current_folder_id);
    }

    /// Placeholder upload action with a user-visible acknowledgement
    fn trigger_upload(&mut self) {
        tracing::info!("Upload requested");
        self.set_status_message("Upload functionality would be implemented here");
    }

    /// Placeholder New menu actions; the drive table is immutable
    fn choose_menu_item(&mut self, row: usize) {
        self.apply(AppEvent::CloseNewMenu);
        if let Some(item) = NEW_MENU_ITEMS.get(row) {
            tracing::info!("New menu choice: {}", item);
            self.set_status_message(format!("{} would be implemented here", item));
        }
    }

    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        tracing::debug!("Theme switched to {}", self.theme.name);
        self.set_status_message(format!("Theme: {}", self.theme.name));
    }

    fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixture::sample_drive;
    use crate::ui::screen::EntriesLayout;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_app() -> App {
        App::new(
            sample_drive().unwrap(),
            ViewMode::Grid,
            Theme::dark(),
            true,
        )
    }

    /// Render once so the layout holds real hit rects
    fn render_once(app: &mut App) {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    fn mouse_down(x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::empty());
    }

    #[test]
    fn test_enter_opens_selected_folder() {
        let mut app = make_app();
        render_once(&mut app);

        // The first root entry is the Documents folder.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().current_folder_id, NodeId::from("documents"));
        assert_eq!(app.state().selected, 0);
    }

    #[test]
    fn test_enter_on_file_is_a_no_op() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Enter); // into documents
        render_once(&mut app);

        press(&mut app, KeyCode::Enter); // Resume.docx
        assert_eq!(app.state().current_folder_id, NodeId::from("documents"));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_backspace_navigates_up() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state().current_folder_id, NodeId::from("root"));
    }

    #[test]
    fn test_v_toggles_view_mode() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.state().view_mode, ViewMode::List);
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.state().view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = make_app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_upload_sets_acknowledgement() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(
            app.status_message(),
            Some("Upload functionality would be implemented here")
        );

        // Esc clears the message again.
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.status_message(), None);
    }

    #[test]
    fn test_menu_keyboard_flow() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('n'));
        assert!(app.state().menu_open());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.state().menu, Some(1));

        press(&mut app, KeyCode::Enter);
        assert!(!app.state().menu_open());
        assert_eq!(
            app.status_message(),
            Some("New Document would be implemented here")
        );
    }

    #[test]
    fn test_menu_is_modal() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Char('n'));

        // Navigation keys must not reach the browser while open.
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state().current_folder_id, NodeId::from("root"));
        assert!(app.state().menu_open());

        press(&mut app, KeyCode::Esc);
        assert!(!app.state().menu_open());
    }

    #[test]
    fn test_arrow_keys_move_by_grid_row() {
        let mut app = make_app();
        render_once(&mut app);
        let columns = app.layout.entries.columns();
        // The root holds 5 entries, enough for a second grid row.
        assert!(columns > 1 && columns < 5);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.state().selected, columns);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.state().selected, 0);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.state().selected, 1);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.state().selected, 0);
    }

    fn grid_tiles_area(app: &App) -> ratatui::layout::Rect {
        match &app.layout.entries {
            EntriesLayout::Grid(grid) => grid.tiles_area,
            other => panic!("unexpected entries layout: {:?}", other),
        }
    }

    #[test]
    fn test_click_on_folder_entry_navigates() {
        let mut app = make_app();
        render_once(&mut app);

        let tiles_area = grid_tiles_area(&app);
        let handled = app.handle_mouse(mouse_down(tiles_area.x, tiles_area.y));
        assert!(handled);
        assert_eq!(app.state().current_folder_id, NodeId::from("documents"));
    }

    #[test]
    fn test_click_on_file_entry_selects_only() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Enter); // documents
        render_once(&mut app);

        let tiles_area = grid_tiles_area(&app);
        // Find the column where the second tile starts.
        let x = (tiles_area.x..tiles_area.x + tiles_area.width)
            .find(|&x| app.layout.entry_at(x, tiles_area.y) == Some(1))
            .unwrap();
        app.handle_mouse(mouse_down(x, tiles_area.y));
        assert_eq!(app.state().current_folder_id, NodeId::from("documents"));
        assert_eq!(app.state().selected, 1);
    }

    #[test]
    fn test_click_breadcrumb_navigates() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Enter); // documents
        render_once(&mut app);
        assert_eq!(app.layout.crumbs.len(), 2);

        let rect = app.layout.crumbs[0].0;
        app.handle_mouse(mouse_down(rect.x, rect.y));
        assert_eq!(app.state().current_folder_id, NodeId::from("root"));
    }

    #[test]
    fn test_sidebar_my_drive_returns_to_root() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Enter);
        render_once(&mut app);

        let my_drive = app
            .layout
            .sidebar
            .iter()
            .find(|(_, item)| *item == SidebarItem::MyDrive)
            .map(|(rect, _)| *rect)
            .unwrap();
        app.handle_mouse(mouse_down(my_drive.x, my_drive.y));
        assert_eq!(app.state().current_folder_id, NodeId::from("root"));
    }

    #[test]
    fn test_view_buttons_set_mode() {
        let mut app = make_app();
        render_once(&mut app);

        let list = app.layout.list_button;
        app.handle_mouse(mouse_down(list.x, list.y));
        assert_eq!(app.state().view_mode, ViewMode::List);

        render_once(&mut app);
        let grid = app.layout.grid_button;
        app.handle_mouse(mouse_down(grid.x, grid.y));
        assert_eq!(app.state().view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_click_outside_menu_closes_it() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Char('n'));
        render_once(&mut app);
        assert!(app.layout.menu_area.is_some());

        app.handle_mouse(mouse_down(0, 0));
        assert!(!app.state().menu_open());
    }

    #[test]
    fn test_menu_click_chooses_item() {
        let mut app = make_app();
        render_once(&mut app);
        press(&mut app, KeyCode::Char('n'));
        render_once(&mut app);

        let area = app.layout.menu_area.unwrap();
        // First item row sits just inside the border.
        app.handle_mouse(mouse_down(area.x + 2, area.y + 1));
        assert!(!app.state().menu_open());
        assert_eq!(
            app.status_message(),
            Some("New Folder would be implemented here")
        );
    }

    #[test]
    fn test_theme_cycles() {
        let mut app = make_app();
        let before = app.theme().name.clone();
        press(&mut app, KeyCode::Char('t'));
        assert_ne!(app.theme().name, before);
        assert!(app.status_message().unwrap().starts_with("Theme: "));
    }
}
