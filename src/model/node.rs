use std::fmt;

/// Unique identifier for a node in the drive table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// What a node is, which decides its icon and whether it can hold children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Folder,
    Document,
    Spreadsheet,
    Presentation,
    Image,
    Pdf,
    Archive,
    Text,
}

impl NodeKind {
    /// Check if this kind may carry children
    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder)
    }
}

/// Represents one entry in the drive table
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Kind of entry
    pub kind: NodeKind,
    /// Parent node id (None for the root)
    pub parent: Option<NodeId>,
    /// Child node ids, in display order (folders only)
    pub children: Vec<NodeId>,
    /// Display size, e.g. "245 KB" (leaves only, optional)
    pub size: Option<String>,
    /// Display modification date, e.g. "May 12, 2023" (leaves only, optional)
    pub modified: Option<String>,
}

impl Node {
    /// Create a folder node with the given children, in display order
    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        parent: Option<NodeId>,
        children: Vec<NodeId>,
    ) -> Self {
        Self {
            id: NodeId(id.into()),
            name: name.into(),
            kind: NodeKind::Folder,
            parent,
            children,
            size: None,
            modified: None,
        }
    }

    /// Create a leaf node with optional display metadata
    pub fn leaf(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
        parent: NodeId,
        size: Option<&str>,
        modified: Option<&str>,
    ) -> Self {
        Self {
            id: NodeId(id.into()),
            name: name.into(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
            size: size.map(str::to_string),
            modified: modified.map(str::to_string),
        }
    }

    /// Check if this node is a folder
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Check if this node is a leaf (anything that is not a folder)
    pub fn is_leaf(&self) -> bool {
        !self.is_folder()
    }
}
