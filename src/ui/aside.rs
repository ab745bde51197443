use crate::app::{AppMode, AppState};
use crate::coordinator::{BrowseContent, Panel};
use crate::model::{DisplayOption, DocEntry, Documentation, Properties};
use crate::ui::constants::{CHECKED, CURSOR_INDICATOR, UNCHECKED};
use crate::ui::text::TextWrapper;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn hint(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

/// Lines for a property table: top-level properties, then each group under
/// its own heading.
pub fn property_lines(properties: &Properties, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for property in &properties.properties {
        lines.push(property_line(&property.name, &property.values, width));
    }
    for group in &properties.groups {
        lines.push(Line::from(""));
        lines.push(heading(group.name.clone()));
        for property in &group.properties {
            lines.push(property_line(&property.name, &property.values, width));
        }
    }
    lines
}

fn property_line(name: &str, values: &[String], width: usize) -> Line<'static> {
    let value = TextWrapper::truncate(&values.join(", "), width.saturating_sub(name.len() + 2));
    Line::from(vec![
        Span::styled(format!("{}: ", name), Style::default().fg(Color::Cyan)),
        Span::raw(value),
    ])
}

// Aside renderer
pub struct AsideRenderer;

impl AsideRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, panel: Panel, area: Rect) {
        match panel {
            Panel::Hidden => {}
            Panel::Browse(content) => Self::render_browse(frame, app, content, area),
            Panel::NodeProperties => {
                if let Some(properties) = app.coordinator.selection().node_properties() {
                    Self::render_node_properties(frame, properties, area);
                }
            }
            Panel::NodeDocumentation => {
                if let Some(documentation) = app.coordinator.selection().node_documentation() {
                    Self::render_documentation(frame, documentation, area);
                }
            }
        }
    }

    fn render_browse(frame: &mut Frame, app: &AppState, content: BrowseContent, area: Rect) {
        let constraints = match content {
            BrowseContent::Full => vec![
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(5),
                Constraint::Length(4),
            ],
            BrowseContent::SearchOnly => vec![Constraint::Length(3), Constraint::Min(3)],
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        Self::render_search_box(frame, app, chunks[0]);
        Self::render_results(frame, app, chunks[1]);
        if content == BrowseContent::Full {
            Self::render_options(frame, app, chunks[2]);
            Self::render_commands(frame, chunks[3]);
        }
    }

    fn render_search_box(frame: &mut Frame, app: &AppState, area: Rect) {
        let query = app.coordinator.search().query();
        let focused = app.mode == AppMode::Search;
        let line = if focused {
            Line::from(format!("{}{}", query, CURSOR_INDICATOR))
        } else if query.is_empty() {
            hint("Press / to search")
        } else {
            Line::from(query.to_string())
        };
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ");
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_results(frame: &mut Frame, app: &AppState, area: Rect) {
        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = app
            .coordinator
            .search()
            .results()
            .iter()
            .map(|item| {
                let label = format!("{:<5} {}", item.kind.label(), item.name);
                ListItem::new(TextWrapper::truncate(&label, width))
            })
            .collect();

        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(app.result_cursor));
        }
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Results "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_options(frame: &mut Frame, app: &AppState, area: Rect) {
        let options = app.coordinator.options();
        let lines: Vec<Line> = DisplayOption::ALL
            .iter()
            .map(|&option| {
                let mark = if options.get(option) { CHECKED } else { UNCHECKED };
                let key = match option {
                    DisplayOption::Attributes => 'a',
                    DisplayOption::Initializers => 'i',
                    DisplayOption::Names => 'n',
                };
                Line::from(format!("{} {} ({})", mark, option.label(), key))
            })
            .collect();
        let block = Block::default().borders(Borders::ALL).title(" Display ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_commands(frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from("m model properties"),
            Line::from("x export svg  X export png"),
            Line::from("o change model"),
        ];
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_node_properties(frame: &mut Frame, properties: &Properties, area: Rect) {
        let width = area.width.saturating_sub(2) as usize;
        let mut lines = property_lines(properties, width);
        lines.push(Line::from(""));
        lines.push(hint("d documentation  Esc close"));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Node Properties ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_documentation(frame: &mut Frame, documentation: &Documentation, area: Rect) {
        let width = area.width.saturating_sub(2) as usize;
        let mut lines = vec![heading(documentation.name.clone())];

        for text in [&documentation.summary, &documentation.description]
            .into_iter()
            .flatten()
        {
            lines.push(Line::from(""));
            lines.extend(TextWrapper::wrap(text, width).into_iter().map(Line::from));
        }

        let sections: [(&str, &[DocEntry]); 3] = [
            ("Attributes", documentation.attributes.as_slice()),
            ("Inputs", documentation.inputs.as_slice()),
            ("Outputs", documentation.outputs.as_slice()),
        ];
        for (title, entries) in sections {
            if entries.is_empty() {
                continue;
            }
            lines.push(Line::from(""));
            lines.push(heading(title));
            for entry in entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", entry.name), Style::default().fg(Color::Cyan)),
                    Span::raw(entry.description.clone()),
                ]));
            }
        }
        lines.push(Line::from(""));
        lines.push(hint("Esc back to properties"));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Documentation ");
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}
