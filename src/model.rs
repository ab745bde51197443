use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Name given to a fetched payload that arrives without a filename.
pub const PLACEHOLDER_FILENAME: &str = "unknown_model";

/// A named binary payload staged for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    payload: Arc<[u8]>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        let payload: Vec<u8> = payload.into();
        Self {
            name: name.into(),
            payload: Arc::from(payload),
        }
    }

    /// Reads a file from disk, naming the handle after the final path component.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let payload = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, payload))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

/// The ordered, immutable set of files currently staged for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    files: Arc<[FileHandle]>,
}

impl FileSet {
    /// Builds a set when at least one file carries a payload.
    pub fn from_files(files: Vec<FileHandle>) -> Option<Self> {
        if files.iter().any(|file| file.size() > 0) {
            Some(Self {
                files: Arc::from(files),
            })
        } else {
            None
        }
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(FileHandle::name).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Opaque index of a node inside the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchItemKind {
    Node,
    Input,
    Output,
    Initializer,
}

impl SearchItemKind {
    pub fn label(self) -> &'static str {
        match self {
            SearchItemKind::Node => "node",
            SearchItemKind::Input => "input",
            SearchItemKind::Output => "output",
            SearchItemKind::Initializer => "initializer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub name: String,
    pub kind: SearchItemKind,
    pub node: NodeRef,
}

impl SearchItem {
    pub fn new(name: impl Into<String>, kind: SearchItemKind, node: NodeRef) -> Self {
        Self {
            name: name.into(),
            kind,
            node,
        }
    }
}

/// Engine answer to a search: the text it matched against and the hits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub text: String,
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub values: Vec<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroup {
    pub name: String,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    pub properties: Vec<Property>,
    pub groups: Vec<PropertyGroup>,
}

impl Properties {
    /// First value of a top-level property.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .and_then(|property| property.values.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub attributes: Vec<DocEntry>,
    pub inputs: Vec<DocEntry>,
    pub outputs: Vec<DocEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOption {
    Attributes,
    Initializers,
    Names,
}

impl DisplayOption {
    pub const ALL: [DisplayOption; 3] = [
        DisplayOption::Attributes,
        DisplayOption::Initializers,
        DisplayOption::Names,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayOption::Attributes => "Show attributes",
            DisplayOption::Initializers => "Show initializers",
            DisplayOption::Names => "Show node names",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_attributes: bool,
    pub show_initializers: bool,
    pub show_names: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_attributes: false,
            show_initializers: true,
            show_names: false,
        }
    }
}

impl DisplayOptions {
    pub fn get(&self, option: DisplayOption) -> bool {
        match option {
            DisplayOption::Attributes => self.show_attributes,
            DisplayOption::Initializers => self.show_initializers,
            DisplayOption::Names => self.show_names,
        }
    }

    pub fn toggle(&mut self, option: DisplayOption) {
        let flag = match option {
            DisplayOption::Attributes => &mut self.show_attributes,
            DisplayOption::Initializers => &mut self.show_initializers,
            DisplayOption::Names => &mut self.show_names,
        };
        *flag = !*flag;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
