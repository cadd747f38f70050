use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Rendered in place of a name when a node carries no usable metadata.
pub const PLACEHOLDER: &str = "(??)";

/// Source position of a node.
///
/// Line and column values are 1-based for human-readable error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl FileInfo {
    pub fn new(filename: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Metadata the parser attaches to every syntax node.
///
/// The machine carries it around opaquely; only renderers and error
/// reporters look inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    #[serde(flatten)]
    pub file: FileInfo,
    /// Variable, parameter or global name; empty for applications.
    pub name: String,
}

impl MetaInfo {
    pub fn new(file: FileInfo, name: impl Into<String>) -> Self {
        Self {
            file,
            name: name.into(),
        }
    }

    /// Name lookup suitable for rendering: `None` when the metadata is not a
    /// [`MetaInfo`].
    pub fn name_of(meta: &dyn Any) -> Option<String> {
        meta.downcast_ref::<MetaInfo>().map(|mi| mi.name.clone())
    }
}
