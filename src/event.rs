use crate::actions::{parse_dropped_paths, Action};
use crate::app::{AppMode, AppState};
use crate::coordinator::{Affordance, ViewFrame};
use crate::engine::SurfaceInput;
use crate::model::{DisplayOption, ExportFormat};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub fn handle_events(app: &AppState, tick: Duration) -> Result<Option<Action>> {
    if event::poll(tick)? {
        return Ok(match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
            Event::Paste(text) => handle_paste(app, &text),
            _ => None,
        });
    }
    Ok(None)
}

/// Maps a key to an action. Keys for affordances the current frame does not
/// offer map to nothing.
pub fn handle_key_event(app: &AppState, key: KeyEvent) -> Option<Action> {
    let frame = app.frame();
    let action = match &app.mode {
        AppMode::Normal => handle_normal_mode(&frame, key),
        AppMode::Search => handle_search_mode(key),
        AppMode::PickFile { .. } => handle_picker_mode(key),
        AppMode::Help => handle_help_mode(key),
    }?;

    match action.affordance() {
        Some(affordance) if !frame.allows(affordance) => None,
        _ => Some(action),
    }
}

/// Terminals deliver dropped files as a bracketed paste of their paths.
pub fn handle_paste(app: &AppState, text: &str) -> Option<Action> {
    if app.mode != AppMode::Normal || !app.frame().allows(Affordance::DropFiles) {
        return None;
    }
    let paths = parse_dropped_paths(text);
    if paths.is_empty() {
        None
    } else {
        Some(Action::DropFiles(paths))
    }
}

fn handle_normal_mode(frame: &ViewFrame, key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        // Quit
        (Char('q'), KeyModifiers::NONE) => Some(Action::Quit),
        (Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),

        // Files
        (Char('o'), KeyModifiers::NONE) => Some(Action::OpenFilePicker),

        // Search
        (Char('/'), KeyModifiers::NONE) | (Char('f'), KeyModifiers::CONTROL) => {
            Some(Action::FocusSearch)
        }

        // Browse panel
        (Char('a'), KeyModifiers::NONE) => Some(Action::ToggleOption(DisplayOption::Attributes)),
        (Char('i'), KeyModifiers::NONE) => {
            Some(Action::ToggleOption(DisplayOption::Initializers))
        }
        (Char('n'), KeyModifiers::NONE) => Some(Action::ToggleOption(DisplayOption::Names)),
        (Char('m'), KeyModifiers::NONE) => Some(Action::ShowModelProperties),
        (Char('x'), KeyModifiers::NONE) => Some(Action::Export(ExportFormat::Svg)),
        (Char('X'), KeyModifiers::SHIFT) => Some(Action::Export(ExportFormat::Png)),

        // Inspection panels
        (Char('d'), KeyModifiers::NONE) => Some(Action::ShowNodeDocumentation),
        (Esc, _) => Some(Action::Dismiss),

        // Graph surface
        (Char('j'), KeyModifiers::NONE) | (Down, _) => Some(Action::Surface(SurfaceInput::Next)),
        (Char('k'), KeyModifiers::NONE) | (Up, _) => {
            Some(Action::Surface(SurfaceInput::Previous))
        }
        (Enter, _) if frame.panel.model_overlay => Some(Action::CloseModelProperties),
        (Enter, _) => Some(Action::Surface(SurfaceInput::Activate)),

        // Help
        (Char('?'), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(Action::ShowHelp),

        _ => None,
    }
}

fn handle_search_mode(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match key.code {
        Esc => Some(Action::BlurSearch),
        Enter => Some(Action::SelectResult),
        Down => Some(Action::NextResult),
        Up => Some(Action::PreviousResult),
        Backspace => Some(Action::BackspaceSearch),
        Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::TypeSearchChar(c))
        }
        _ => None,
    }
}

fn handle_picker_mode(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match key.code {
        Esc => Some(Action::CancelFilePicker),
        Enter => Some(Action::ConfirmFilePicker),
        Backspace => Some(Action::BackspacePicker),
        Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::TypePickerChar(c))
        }
        _ => None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}
