use crate::model::NodeKind;
use ratatui::style::Color;

/// Icon for a node kind
///
/// Trailing spaces pad double-width glyphs so columns stay aligned.
pub fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "📁 ",
        NodeKind::Document => "📄 ",
        NodeKind::Spreadsheet => "📊 ",
        NodeKind::Presentation => "🎬 ",
        NodeKind::Image => "🖼️  ",
        NodeKind::Pdf => "📕 ",
        NodeKind::Archive => "📦 ",
        NodeKind::Text => "📝 ",
    }
}

/// Icon color for a node kind
pub fn color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::Folder => Color::Blue,
        NodeKind::Document => Color::LightBlue,
        NodeKind::Spreadsheet => Color::Green,
        NodeKind::Presentation => Color::Rgb(255, 150, 60),
        NodeKind::Image => Color::Magenta,
        NodeKind::Pdf => Color::Red,
        NodeKind::Archive => Color::Yellow,
        NodeKind::Text => Color::Gray,
    }
}
