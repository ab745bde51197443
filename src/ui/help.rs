use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// Help section structure
pub struct HelpSection {
    pub title: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

// Help section definitions
pub const SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Model:",
        items: &[
            ("o  ", "Open or change model"),
            ("   ", "Paste or drop paths to load several files"),
            ("m  ", "Model properties"),
            ("x/X", "Export SVG / PNG"),
        ],
    },
    HelpSection {
        title: "Graph:",
        items: &[
            ("j/↓", "Next node"),
            ("k/↑", "Previous node"),
            ("⏎  ", "Show node properties"),
            ("d  ", "Node documentation"),
            ("Esc", "Close the top panel"),
        ],
    },
    HelpSection {
        title: "Search:",
        items: &[
            ("/  ", "Focus search"),
            ("↑/↓", "Move over results"),
            ("⏎  ", "Select result"),
            ("Esc", "Leave search"),
        ],
    },
    HelpSection {
        title: "Display:",
        items: &[
            ("a  ", "Toggle attributes"),
            ("i  ", "Toggle initializers"),
            ("n  ", "Toggle node names"),
        ],
    },
    HelpSection {
        title: "General:",
        items: &[("?  ", "Help"), ("q  ", "Quit")],
    },
];

// Help renderer
pub struct HelpRenderer;

impl HelpRenderer {
    pub fn render(frame: &mut Frame, area: Rect) {
        let help_text = Self::build_help_text();
        let block = Block::default().borders(Borders::ALL).title(" Help ");
        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    fn build_help_text() -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled("graph-inspector Help", bold)),
            Line::from(""),
        ];

        for section in SECTIONS {
            lines.push(Line::from(Span::styled(section.title, bold)));
            for (key, desc) in section.items {
                lines.push(Line::from(format!("  {}  {}", key, desc)));
            }
            lines.push(Line::from(""));
        }

        lines
    }
}
