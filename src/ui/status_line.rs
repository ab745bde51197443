use crate::app::{AppMode, AppState};
use crate::coordinator::ContentArea;
use crate::ui::constants::{CURSOR_INDICATOR, STATUS_PICK_PREFIX, STATUS_SEARCH_PREFIX};
use crate::ui::text::TextWrapper;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

// Status line renderer
pub struct StatusLineRenderer;

impl StatusLineRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let (content, style) = Self::get_content_and_style(app, area);
        let content = TextWrapper::truncate(&content, area.width as usize);
        frame.render_widget(Paragraph::new(content).style(style), area);
    }

    fn get_content_and_style(app: &AppState, area: Rect) -> (String, Style) {
        match &app.mode {
            AppMode::Normal => Self::render_normal_mode(app),
            AppMode::Search => {
                Self::render_prompt(STATUS_SEARCH_PREFIX, app.coordinator.search().query(), area)
            }
            AppMode::PickFile { buffer } => Self::render_prompt(STATUS_PICK_PREFIX, buffer, area),
            AppMode::Help => Self::render_help_mode(),
        }
    }

    fn render_normal_mode(app: &AppState) -> (String, Style) {
        if let Some(ref msg) = app.message {
            let style = Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD);
            return (msg.clone(), style);
        }

        let frame = app.frame();
        let state = match (frame.content, frame.ready) {
            (ContentArea::Loading, _) => "loading".to_string(),
            (ContentArea::Uploader, _) => "no model".to_string(),
            (ContentArea::Surface, false) => "rendering".to_string(),
            (ContentArea::Surface, true) => app
                .coordinator
                .files()
                .map(|files| files.names().join(", "))
                .unwrap_or_default(),
        };
        let content = format!("graph-inspector | {} | ? help", state);
        (content, Style::default().fg(Color::Gray).bg(Color::Black))
    }

    /// Keeps the tail of long input visible, with the cursor at the end.
    fn render_prompt(prefix: &str, input: &str, area: Rect) -> (String, Style) {
        let available = (area.width as usize).saturating_sub(prefix.len() + 1);
        let chars: Vec<char> = input.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(available)..]
            .iter()
            .collect();

        let mut display = String::from(prefix);
        display.push_str(&visible);
        display.push(CURSOR_INDICATOR);

        let style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        (display, style)
    }

    fn render_help_mode() -> (String, Style) {
        let content = String::from("Press ESC or q to close help");
        let style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        (content, style)
    }
}
