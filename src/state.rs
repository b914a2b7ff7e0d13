use crate::event::AppEvent;
use crate::model::{Drive, NodeId};
use serde::{Deserialize, Serialize};

/// Entries of the New popup menu, in display order
///
/// All four are placeholders; the drive table is immutable, so choosing
/// one only surfaces an acknowledgement.
pub const NEW_MENU_ITEMS: [&str; 4] = [
    "New Folder",
    "New Document",
    "New Spreadsheet",
    "New Presentation",
];

/// How folder entries are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
}

impl ViewMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    /// Parse a mode name, e.g. from the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Grid
    }
}

/// The complete browser state: which folder is open, how it is shown,
/// what is selected
#[derive(Debug, Clone)]
pub struct BrowserState {
    /// Id of the folder currently open
    pub current_folder_id: NodeId,
    /// Grid or list layout
    pub view_mode: ViewMode,
    /// Index of the selected entry within the current folder
    pub selected: usize,
    /// Selected row of the New popup menu, while it is open
    pub menu: Option<usize>,
}

impl BrowserState {
    /// Create browser state pointing at the drive root
    pub fn new(drive: &Drive, view_mode: ViewMode) -> Self {
        Self {
            current_folder_id: drive.root_id().clone(),
            view_mode,
            selected: 0,
            menu: None,
        }
    }

    /// Check whether the New popup menu is open
    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Apply an event to the state - the only way to modify state
    ///
    /// The drive is read-only context: it provides entry counts for
    /// clamping and parent links for upward navigation. Navigation to an
    /// id the table does not hold is allowed; rendering and breadcrumbs
    /// degrade to their defined fallbacks instead of failing.
    pub fn apply(&mut self, drive: &Drive, event: &AppEvent) {
        match event {
            AppEvent::Navigate(id) => {
                self.current_folder_id = id.clone();
                self.selected = 0;
                self.menu = None;
            }

            AppEvent::NavigateUp => {
                // From an unresolvable folder this recovers to the root.
                let parent = drive
                    .get(&self.current_folder_id)
                    .and_then(|node| node.parent.clone());
                match parent {
                    Some(parent_id) => {
                        self.current_folder_id = parent_id;
                        self.selected = 0;
                    }
                    None if drive.get(&self.current_folder_id).is_none() => {
                        self.current_folder_id = drive.root_id().clone();
                        self.selected = 0;
                    }
                    None => {}
                }
            }

            AppEvent::SelectDelta(delta) => {
                let count = drive.children_of(&self.current_folder_id).len();
                self.selected = shift_clamped(self.selected, *delta, count);
            }

            AppEvent::SetViewMode(mode) => {
                self.view_mode = *mode;
            }

            AppEvent::ToggleViewMode => {
                self.view_mode = self.view_mode.toggled();
            }

            AppEvent::OpenNewMenu => {
                self.menu = Some(0);
            }

            AppEvent::CloseNewMenu => {
                self.menu = None;
            }

            AppEvent::MenuDelta(delta) => {
                if let Some(row) = self.menu {
                    self.menu = Some(shift_clamped(row, *delta, NEW_MENU_ITEMS.len()));
                }
            }
        }
    }

    /// Apply a sequence of events in order
    pub fn apply_many(&mut self, drive: &Drive, events: &[AppEvent]) {
        for event in events {
            self.apply(drive, event);
        }
    }
}

/// Move an index by a signed offset, clamped to `0..count`
///
/// An empty range pins the index at 0.
fn shift_clamped(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let shifted = index.min(count - 1) as isize + delta;
    shifted.clamp(0, count as isize - 1) as usize
}
