use crate::app::AppState;
use crate::coordinator::{Affordance, ContentArea};
use crate::ui::constants::{LOADING_TEXT, RENDERING_TEXT, UPLOADER_TITLE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// Content area renderer: loading indicator, uploader or engine surface
pub struct ContentRenderer;

impl ContentRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, content: ContentArea, area: Rect) {
        match content {
            ContentArea::Loading => Self::render_centered(frame, LOADING_TEXT, area),
            ContentArea::Uploader => Self::render_uploader(frame, app, area),
            ContentArea::Surface => {
                app.coordinator
                    .engine()
                    .render_surface(area, frame.buffer_mut());
                if !app.frame().ready {
                    Self::render_centered(frame, RENDERING_TEXT, area);
                }
            }
        }
    }

    fn render_centered(frame: &mut Frame, text: &str, area: Rect) {
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height));
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(paragraph, row);
    }

    fn render_uploader(frame: &mut Frame, app: &AppState, area: Rect) {
        let offered = app.frame().allows(Affordance::Upload);
        let style = if offered {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let lines = vec![
            Line::from(""),
            Line::from("Press o to choose a model file"),
            Line::from("or drop files onto this window"),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(UPLOADER_TITLE);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}
