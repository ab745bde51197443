use crate::model::Properties;
use crate::ui::aside::property_lines;
use crate::ui::constants::{DIALOG_MAX_HEIGHT, DIALOG_MAX_WIDTH};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A dialog of at most `max_width` x `max_height`, centered in `area`.
pub fn centered_dialog_area(area: Rect, max_width: u16, max_height: u16) -> Rect {
    let width = area.width.min(max_width);
    let height = area.height.min(max_height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

// Model properties dialog
pub struct ModelPropertiesRenderer;

impl ModelPropertiesRenderer {
    pub fn render(frame: &mut Frame, properties: &Properties, area: Rect) {
        let dialog = centered_dialog_area(area, DIALOG_MAX_WIDTH, DIALOG_MAX_HEIGHT);
        frame.render_widget(Clear, dialog);

        let mut lines = property_lines(properties, dialog.width.saturating_sub(2) as usize);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Esc or Enter to close",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Model Properties ");
        frame.render_widget(Paragraph::new(lines).block(block), dialog);
    }
}
