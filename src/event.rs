use crate::model::NodeId;
use crate::state::ViewMode;

/// A user intent applied to browser state
///
/// Input handling translates raw key/mouse events into these; the state
/// applies them. Nothing else mutates `BrowserState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Make the given node the current folder
    Navigate(NodeId),
    /// Step from the current folder to its parent
    NavigateUp,
    /// Move the entry selection by a signed offset (clamped)
    SelectDelta(isize),
    /// Switch to a specific view mode
    SetViewMode(ViewMode),
    /// Flip between grid and list
    ToggleViewMode,
    /// Open the New popup menu on its first row
    OpenNewMenu,
    /// Close the New popup menu
    CloseNewMenu,
    /// Move the New menu selection by a signed offset (clamped)
    MenuDelta(isize),
}
