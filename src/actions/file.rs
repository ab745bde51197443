use crate::app::{AppMode, AppState};
use crate::coordinator::AcquireSource;
use crate::errors::{AppError, AppResult};
use crate::model::FileHandle;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Opens the picker from the uploader or the change-model button.
pub fn open_file_picker(app: &mut AppState) {
    app.coordinator.request_manual_selection();
    app.mode = AppMode::PickFile {
        buffer: String::new(),
    };
}

pub fn type_picker_char(app: &mut AppState, c: char) {
    if let AppMode::PickFile { buffer } = &mut app.mode {
        buffer.push(c);
    }
}

pub fn backspace_picker(app: &mut AppState) {
    if let AppMode::PickFile { buffer } = &mut app.mode {
        buffer.pop();
    }
}

pub fn confirm_file_picker(app: &mut AppState) {
    let AppMode::PickFile { buffer } = &app.mode else {
        return;
    };
    let path = PathBuf::from(buffer.trim());
    app.mode = AppMode::Normal;

    if path.as_os_str().is_empty() {
        app.coordinator.cancel_selection();
        return;
    }
    let Some(path) = app.coordinator.choose_file(path) else {
        return;
    };

    match open(&path) {
        Ok(handle) => acquire(app, AcquireSource::Picked(vec![handle])),
        Err(err) => {
            warn!(error = %err, "cannot open picked file");
            app.set_message(err.to_string());
        }
    }
}

pub fn cancel_file_picker(app: &mut AppState) {
    app.coordinator.cancel_selection();
    app.mode = AppMode::Normal;
}

/// Reads every dropped path; unreadable ones are skipped.
pub fn drop_files(app: &mut AppState, paths: Vec<PathBuf>) {
    let mut handles = Vec::with_capacity(paths.len());
    for path in &paths {
        match open(path) {
            Ok(handle) => handles.push(handle),
            Err(err) => warn!(error = %err, "skipping dropped file"),
        }
    }
    acquire(app, AcquireSource::Dropped(handles));
}

fn open(path: &Path) -> AppResult<FileHandle> {
    FileHandle::from_path(path).map_err(|source| AppError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}

fn acquire(app: &mut AppState, source: AcquireSource) {
    match app.coordinator.acquire(source) {
        Ok(_) => {
            app.result_cursor = 0;
            if let Some(files) = app.coordinator.files() {
                let names = files.names().join(", ");
                app.set_message(format!("Loading {}", names));
            }
        }
        Err(err) => app.set_message(format!("Nothing loaded: {}", err)),
    }
}

/// Splits a bracketed paste into paths. Terminals paste dropped files as
/// whitespace separated, optionally quoted, paths.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', None) => escaped = true,
            ('\'' | '"', None) => quote = Some(c),
            (c, Some(open)) if c == open => quote = None,
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            (c, _) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }
    paths
}
