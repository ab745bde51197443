//! A text rendering engine for line-oriented outline models.
//!
//! ```text
//! # name: tiny-convnet
//! input data shape=1x3x32x32
//! init conv1_weights shape=16x3x3x3
//! node conv1 Conv inputs=data,conv1_weights kernel=3x3
//! node relu1 Relu inputs=conv1
//! output prob
//! ```

use super::{
    EngineEvent, ExportError, Generation, RenderEngine, RequestTicket, SearchRequest,
    SurfaceInput,
};
use crate::model::{
    DisplayOptions, DocEntry, Documentation, ExportFormat, FileSet, NodeRef, Properties, Property,
    PropertyGroup, SearchItem, SearchItemKind, SearchResult,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};

static METADATA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*([^:]+?)\s*:\s*(.*)$").expect("metadata pattern"));
static ATTRIBUTE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w.-]*)=(.+)$").expect("attribute pattern"));

const INPUTS_ATTRIBUTE: &str = "inputs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub kind: SearchItemKind,
    pub name: String,
    pub op: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineGraph {
    pub files: Vec<String>,
    pub metadata: Vec<(String, String)>,
    pub items: Vec<OutlineItem>,
}

impl OutlineGraph {
    fn count(&self, kind: SearchItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }
}

/// Parses every file of the set in order into one graph. Payloads that are
/// not UTF-8 are read lossily; unknown lines are skipped.
pub fn parse_outline(files: &FileSet) -> OutlineGraph {
    let mut graph = OutlineGraph {
        files: files.names().into_iter().map(str::to_owned).collect(),
        ..OutlineGraph::default()
    };

    for file in files.files() {
        let text = String::from_utf8_lossy(file.payload());
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(captures) = METADATA_LINE.captures(line) {
                graph
                    .metadata
                    .push((captures[1].to_string(), captures[2].to_string()));
                continue;
            }
            match parse_statement(line) {
                Some(item) => graph.items.push(item),
                None => debug!(file = file.name(), line = number + 1, "skipping outline line"),
            }
        }
    }

    graph
}

fn parse_statement(line: &str) -> Option<OutlineItem> {
    let mut tokens = line.split_whitespace();
    let kind = match tokens.next()? {
        "node" => SearchItemKind::Node,
        "input" => SearchItemKind::Input,
        "output" => SearchItemKind::Output,
        "init" => SearchItemKind::Initializer,
        _ => return None,
    };
    let name = tokens.next()?.to_string();
    let op = if kind == SearchItemKind::Node {
        Some(tokens.next()?.to_string())
    } else {
        None
    };

    let mut attributes = Vec::new();
    let mut inputs = Vec::new();
    for token in tokens {
        let Some(captures) = ATTRIBUTE_TOKEN.captures(token) else {
            continue;
        };
        if &captures[1] == INPUTS_ATTRIBUTE {
            inputs.extend(
                captures[2]
                    .split(',')
                    .filter(|input| !input.is_empty())
                    .map(str::to_owned),
            );
        } else {
            attributes.push((captures[1].to_string(), captures[2].to_string()));
        }
    }

    Some(OutlineItem {
        kind,
        name,
        op,
        attributes,
        inputs,
    })
}

struct OperatorDoc {
    name: &'static str,
    summary: &'static str,
    attributes: &'static [(&'static str, &'static str)],
    inputs: &'static [(&'static str, &'static str)],
    outputs: &'static [(&'static str, &'static str)],
}

const OPERATORS: &[OperatorDoc] = &[
    OperatorDoc {
        name: "Conv",
        summary: "Convolves the input tensor with a learned filter bank.",
        attributes: &[
            ("kernel", "Spatial shape of the filter."),
            ("strides", "Step along each spatial axis."),
            ("pads", "Padding added before and after each axis."),
        ],
        inputs: &[("X", "Input tensor."), ("W", "Filter weights."), ("B", "Optional bias.")],
        outputs: &[("Y", "Feature map.")],
    },
    OperatorDoc {
        name: "Relu",
        summary: "Rectified linear unit, max(0, x) applied elementwise.",
        attributes: &[],
        inputs: &[("X", "Input tensor.")],
        outputs: &[("Y", "Output tensor with the same shape.")],
    },
    OperatorDoc {
        name: "MaxPool",
        summary: "Takes the maximum over sliding windows of the input.",
        attributes: &[("kernel", "Window shape."), ("strides", "Window step.")],
        inputs: &[("X", "Input tensor.")],
        outputs: &[("Y", "Pooled tensor.")],
    },
    OperatorDoc {
        name: "Gemm",
        summary: "General matrix multiplication, alpha * A * B + beta * C.",
        attributes: &[("alpha", "Scale of A * B."), ("beta", "Scale of C.")],
        inputs: &[("A", "Left matrix."), ("B", "Right matrix."), ("C", "Optional addend.")],
        outputs: &[("Y", "Result matrix.")],
    },
    OperatorDoc {
        name: "Add",
        summary: "Elementwise addition with broadcasting.",
        attributes: &[],
        inputs: &[("A", "First operand."), ("B", "Second operand.")],
        outputs: &[("C", "Sum.")],
    },
    OperatorDoc {
        name: "Softmax",
        summary: "Normalizes the input into a probability distribution along an axis.",
        attributes: &[("axis", "Axis to normalize over.")],
        inputs: &[("input", "Logits.")],
        outputs: &[("output", "Probabilities.")],
    },
];

fn entries(pairs: &[(&str, &str)]) -> Vec<DocEntry> {
    pairs
        .iter()
        .map(|(name, description)| DocEntry {
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

/// Documentation for an operator type, or a stub naming the unknown type.
pub fn documentation_for(op: &str) -> Documentation {
    match OPERATORS.iter().find(|doc| doc.name.eq_ignore_ascii_case(op)) {
        Some(doc) => Documentation {
            name: doc.name.to_string(),
            summary: Some(doc.summary.to_string()),
            description: None,
            attributes: entries(doc.attributes),
            inputs: entries(doc.inputs),
            outputs: entries(doc.outputs),
        },
        None => Documentation {
            name: op.to_string(),
            summary: Some("No documentation available for this operator.".to_string()),
            ..Documentation::default()
        },
    }
}

pub struct OutlineEngine {
    events: Sender<EngineEvent>,
    export_dir: PathBuf,
    graph: Option<OutlineGraph>,
    generation: Generation,
    options: DisplayOptions,
    cursor: usize,
    highlighted: Option<usize>,
}

impl OutlineEngine {
    pub fn new(events: Sender<EngineEvent>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            events,
            export_dir: export_dir.into(),
            graph: None,
            generation: Generation::default(),
            options: DisplayOptions::default(),
            cursor: 0,
            highlighted: None,
        }
    }

    pub fn graph(&self) -> Option<&OutlineGraph> {
        self.graph.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn emit(&self, event: EngineEvent) {
        if self.events.send(event).is_err() {
            debug!("engine event receiver dropped");
        }
    }

    fn is_visible(&self, item: &OutlineItem) -> bool {
        item.kind != SearchItemKind::Initializer || self.options.show_initializers
    }

    fn visible_indices(&self) -> Vec<usize> {
        match &self.graph {
            Some(graph) => graph
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| self.is_visible(item))
                .map(|(index, _)| index)
                .collect(),
            None => Vec::new(),
        }
    }

    fn label(&self, item: &OutlineItem) -> String {
        let mut label = match (&item.op, item.kind) {
            (Some(op), SearchItemKind::Node) if self.options.show_names => {
                format!("{} · {}", op, item.name)
            }
            (Some(op), SearchItemKind::Node) => op.clone(),
            _ => format!("{} {}", item.kind.label(), item.name),
        };
        if self.options.show_attributes && !item.attributes.is_empty() {
            let attributes: Vec<String> = item
                .attributes
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            label.push_str("  ");
            label.push_str(&attributes.join(" "));
        }
        label
    }

    fn move_cursor(&mut self, forward: bool) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }
        let position = visible.iter().position(|&index| index == self.cursor);
        let next = match (position, forward) {
            (None, _) => 0,
            (Some(position), true) => (position + 1).min(visible.len() - 1),
            (Some(position), false) => position.saturating_sub(1),
        };
        self.cursor = visible[next];
    }

    fn node_properties(item: &OutlineItem) -> Properties {
        let mut properties = vec![
            Property::new("name", item.name.clone()),
            Property::new(
                "type",
                item.op
                    .clone()
                    .unwrap_or_else(|| item.kind.label().to_string()),
            ),
        ];
        if !item.inputs.is_empty() {
            properties.push(Property::with_values("inputs", item.inputs.clone()));
        }

        let mut groups = Vec::new();
        if !item.attributes.is_empty() {
            groups.push(PropertyGroup {
                name: "Attributes".to_string(),
                properties: item
                    .attributes
                    .iter()
                    .map(|(key, value)| Property::new(key.clone(), value.clone()))
                    .collect(),
            });
        }

        Properties { properties, groups }
    }

    fn export_svg(&self, path: &Path) -> std::io::Result<()> {
        let graph_lines: Vec<String> = match &self.graph {
            Some(graph) => self
                .visible_indices()
                .into_iter()
                .map(|index| self.label(&graph.items[index]))
                .collect(),
            None => Vec::new(),
        };

        let height = 24 * (graph_lines.len() + 1);
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"{}\">\n",
            height
        );
        for (row, line) in graph_lines.iter().enumerate() {
            svg.push_str(&format!(
                "  <text x=\"12\" y=\"{}\" font-family=\"monospace\">{}</text>\n",
                24 * (row + 1),
                escape_xml(line)
            ));
        }
        svg.push_str("</svg>\n");

        fs::create_dir_all(&self.export_dir)?;
        fs::write(path, svg)
    }

    fn export_stem(&self) -> String {
        self.graph
            .as_ref()
            .and_then(|graph| graph.files.first())
            .and_then(|name| Path::new(name).file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "graph".to_string())
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl RenderEngine for OutlineEngine {
    fn load(&mut self, files: &FileSet, generation: Generation, options: DisplayOptions) {
        let graph = parse_outline(files);
        info!(
            generation = generation.value(),
            items = graph.items.len(),
            "outline rendered"
        );
        self.graph = Some(graph);
        self.generation = generation;
        self.options = options;
        self.cursor = self.visible_indices().first().copied().unwrap_or(0);
        self.highlighted = None;
        self.emit(EngineEvent::Rendered { generation });
    }

    fn set_display_options(&mut self, options: DisplayOptions) {
        self.options = options;
        let visible = self.visible_indices();
        if !visible.contains(&self.cursor) {
            self.cursor = visible.first().copied().unwrap_or(0);
        }
        if self.highlighted.is_some_and(|index| !visible.contains(&index)) {
            self.highlighted = None;
        }
    }

    fn search(&mut self, request: SearchRequest) {
        let needle = request.query.to_lowercase();
        let items = match &self.graph {
            Some(graph) if !needle.is_empty() => self
                .visible_indices()
                .into_iter()
                .filter(|&index| graph.items[index].name.to_lowercase().contains(&needle))
                .map(|index| {
                    let item = &graph.items[index];
                    SearchItem::new(item.name.clone(), item.kind, NodeRef::new(index))
                })
                .collect(),
            _ => Vec::new(),
        };
        self.emit(EngineEvent::SearchResults {
            ticket: request.ticket,
            result: SearchResult {
                text: request.query,
                items,
            },
        });
    }

    fn select(&mut self, item: &SearchItem) {
        let index = item.node.index();
        if self.graph.as_ref().is_some_and(|graph| index < graph.items.len()) {
            self.cursor = index;
            self.highlighted = Some(index);
        }
    }

    fn show_model_properties(&mut self) {
        let Some(graph) = &self.graph else {
            return;
        };
        let mut properties = vec![
            Property::new("format", "outline"),
            Property::with_values("files", graph.files.clone()),
        ];
        properties.extend(
            graph
                .metadata
                .iter()
                .map(|(key, value)| Property::new(key.clone(), value.clone())),
        );
        let groups = vec![PropertyGroup {
            name: "Graph".to_string(),
            properties: vec![
                Property::new("nodes", graph.count(SearchItemKind::Node).to_string()),
                Property::new("inputs", graph.count(SearchItemKind::Input).to_string()),
                Property::new("outputs", graph.count(SearchItemKind::Output).to_string()),
                Property::new(
                    "initializers",
                    graph.count(SearchItemKind::Initializer).to_string(),
                ),
            ],
        }];
        self.emit(EngineEvent::ModelProperties {
            generation: self.generation,
            properties: Properties { properties, groups },
        });
    }

    fn show_node_documentation(&mut self, ticket: RequestTicket, properties: &Properties) {
        let op = properties.value("type").unwrap_or("unknown");
        self.emit(EngineEvent::NodeDocumentation {
            ticket,
            documentation: documentation_for(op),
        });
    }

    fn export(&mut self, format: ExportFormat) -> Result<PathBuf, ExportError> {
        match format {
            ExportFormat::Svg => {
                let path = self
                    .export_dir
                    .join(format!("{}.{}", self.export_stem(), format.extension()));
                match self.export_svg(&path) {
                    Ok(()) => {
                        info!(path = %path.display(), "exported outline");
                        Ok(path)
                    }
                    Err(source) => {
                        error!(path = %path.display(), error = %source, "export failed");
                        Err(ExportError::Write { path, source })
                    }
                }
            }
            ExportFormat::Png => {
                warn!("png export is not supported by the outline engine");
                Err(ExportError::Unsupported(format))
            }
        }
    }

    fn surface_input(&mut self, input: SurfaceInput) {
        match input {
            SurfaceInput::Next => self.move_cursor(true),
            SurfaceInput::Previous => self.move_cursor(false),
            SurfaceInput::Activate => {
                let Some(item) = self
                    .graph
                    .as_ref()
                    .and_then(|graph| graph.items.get(self.cursor))
                else {
                    return;
                };
                if !self.is_visible(item) {
                    return;
                }
                let properties = Self::node_properties(item);
                self.emit(EngineEvent::NodeProperties {
                    generation: self.generation,
                    properties,
                });
            }
        }
    }

    fn render_surface(&self, area: Rect, buf: &mut Buffer) {
        let Some(graph) = &self.graph else {
            return;
        };
        let title = format!(" {} ", graph.files.join(", "));
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner_height = area.height.saturating_sub(2) as usize;

        let visible = self.visible_indices();
        let cursor_row = visible
            .iter()
            .position(|&index| index == self.cursor)
            .unwrap_or(0);
        let offset = (cursor_row + 1).saturating_sub(inner_height);

        let lines: Vec<Line> = visible
            .iter()
            .skip(offset)
            .take(inner_height)
            .map(|&index| {
                let mut style = Style::default();
                if Some(index) == self.highlighted {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
                if index == self.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::styled(self.label(&graph.items[index]), style)
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileHandle;
    use std::sync::mpsc::{self, Receiver};
    use tempfile::TempDir;

    const MODEL: &str = "\
# name: tiny-convnet
# producer: hand written
input data shape=1x3x32x32
init conv1_weights shape=16x3x3x3
node conv1 Conv inputs=data,conv1_weights kernel=3x3
node relu1 Relu inputs=conv1
this line is ignored
output prob
";

    fn files() -> FileSet {
        FileSet::from_files(vec![FileHandle::new("tiny.outline", MODEL)]).unwrap()
    }

    fn loaded_engine(export_dir: &Path) -> (OutlineEngine, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut engine = OutlineEngine::new(tx, export_dir);
        engine.load(&files(), Generation::default().next(), DisplayOptions::default());
        (engine, rx)
    }

    fn ticket() -> RequestTicket {
        RequestTicket {
            generation: Generation::default().next(),
            sequence: 1,
        }
    }

    #[test]
    fn test_parse_outline() {
        let graph = parse_outline(&files());
        assert_eq!(graph.files, vec!["tiny.outline"]);
        assert_eq!(graph.metadata.len(), 2);
        assert_eq!(graph.items.len(), 5);

        let conv = &graph.items[2];
        assert_eq!(conv.kind, SearchItemKind::Node);
        assert_eq!(conv.op.as_deref(), Some("Conv"));
        assert_eq!(conv.inputs, vec!["data", "conv1_weights"]);
        assert_eq!(conv.attributes, vec![("kernel".to_string(), "3x3".to_string())]);
    }

    #[test]
    fn test_load_reports_rendered() {
        let dir = TempDir::new().unwrap();
        let (_engine, rx) = loaded_engine(dir.path());
        assert_eq!(
            rx.try_recv().unwrap(),
            EngineEvent::Rendered {
                generation: Generation::default().next()
            }
        );
    }

    #[test]
    fn test_search_matches_visible_items() {
        let dir = TempDir::new().unwrap();
        let (mut engine, rx) = loaded_engine(dir.path());
        let _ = rx.try_recv();

        engine.search(SearchRequest {
            ticket: ticket(),
            query: "CONV1".to_string(),
        });
        let EngineEvent::SearchResults { result, .. } = rx.try_recv().unwrap() else {
            panic!("expected search results");
        };
        let names: Vec<&str> = result.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["conv1_weights", "conv1"]);

        let mut options = DisplayOptions::default();
        options.show_initializers = false;
        engine.set_display_options(options);
        engine.search(SearchRequest {
            ticket: ticket(),
            query: "conv1".to_string(),
        });
        let EngineEvent::SearchResults { result, .. } = rx.try_recv().unwrap() else {
            panic!("expected search results");
        };
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "conv1");
    }

    #[test]
    fn test_empty_query_has_no_results() {
        let dir = TempDir::new().unwrap();
        let (mut engine, rx) = loaded_engine(dir.path());
        let _ = rx.try_recv();

        engine.search(SearchRequest {
            ticket: ticket(),
            query: String::new(),
        });
        let EngineEvent::SearchResults { result, .. } = rx.try_recv().unwrap() else {
            panic!("expected search results");
        };
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_activate_reports_node_properties() {
        let dir = TempDir::new().unwrap();
        let (mut engine, rx) = loaded_engine(dir.path());
        let _ = rx.try_recv();

        engine.surface_input(SurfaceInput::Next);
        engine.surface_input(SurfaceInput::Next);
        engine.surface_input(SurfaceInput::Activate);

        let EngineEvent::NodeProperties { properties, .. } = rx.try_recv().unwrap() else {
            panic!("expected node properties");
        };
        assert_eq!(properties.value("name"), Some("conv1"));
        assert_eq!(properties.value("type"), Some("Conv"));
        assert_eq!(properties.groups[0].name, "Attributes");
    }

    #[test]
    fn test_select_moves_cursor_and_highlight() {
        let dir = TempDir::new().unwrap();
        let (mut engine, _rx) = loaded_engine(dir.path());

        engine.select(&SearchItem::new("relu1", SearchItemKind::Node, NodeRef::new(3)));
        assert_eq!(engine.cursor(), 3);
        assert_eq!(engine.highlighted(), Some(3));
    }

    #[test]
    fn test_documentation_lookup() {
        let doc = documentation_for("relu");
        assert_eq!(doc.name, "Relu");
        assert_eq!(doc.inputs.len(), 1);

        let unknown = documentation_for("FancyOp");
        assert_eq!(unknown.name, "FancyOp");
        assert!(unknown.attributes.is_empty());
    }

    #[test]
    fn test_model_properties_include_metadata() {
        let dir = TempDir::new().unwrap();
        let (mut engine, rx) = loaded_engine(dir.path());
        let _ = rx.try_recv();

        engine.show_model_properties();
        let EngineEvent::ModelProperties { properties, .. } = rx.try_recv().unwrap() else {
            panic!("expected model properties");
        };
        assert_eq!(properties.value("format"), Some("outline"));
        assert_eq!(properties.value("name"), Some("tiny-convnet"));
        assert_eq!(properties.groups[0].properties[0].values, vec!["2"]);
    }

    #[test]
    fn test_export_svg_writes_file() {
        let dir = TempDir::new().unwrap();
        let (mut engine, _rx) = loaded_engine(dir.path());

        let path = engine.export(ExportFormat::Svg).unwrap();
        assert_eq!(path, dir.path().join("tiny.svg"));
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Conv"));

        assert!(matches!(
            engine.export(ExportFormat::Png),
            Err(ExportError::Unsupported(ExportFormat::Png))
        ));
        assert!(!dir.path().join("tiny.png").exists());
    }
}
