use crate::engine::Generation;
use crate::fetch::FetchResponse;
use crate::model::{FileHandle, FileSet, PLACEHOLDER_FILENAME};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    #[error("no file with content to load")]
    Empty,
}

#[derive(Debug, Clone)]
pub enum AcquireSource {
    Fetched(FetchResponse),
    Picked(Vec<FileHandle>),
    Dropped(Vec<FileHandle>),
}

impl AcquireSource {
    fn label(&self) -> &'static str {
        match self {
            AcquireSource::Fetched(_) => "fetch",
            AcquireSource::Picked(_) => "picker",
            AcquireSource::Dropped(_) => "drop",
        }
    }

    fn into_files(self) -> Vec<FileHandle> {
        match self {
            AcquireSource::Fetched(response) => {
                let name = response
                    .filename
                    .unwrap_or_else(|| PLACEHOLDER_FILENAME.to_string());
                vec![FileHandle::new(name, response.payload)]
            }
            // single-file control
            AcquireSource::Picked(mut files) => {
                files.truncate(FilePicker::MAX_FILES);
                files
            }
            AcquireSource::Dropped(files) => files,
        }
    }
}

/// The hidden single-file selection control.
///
/// Like a native file input, a choice only counts as a change when it differs
/// from the control's current value, so the value is cleared every time the
/// picker is opened.
#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    value: Option<PathBuf>,
    open: bool,
}

impl FilePicker {
    pub const MAX_FILES: usize = 1;

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn value(&self) -> Option<&PathBuf> {
        self.value.as_ref()
    }

    fn open(&mut self) {
        self.value = None;
        self.open = true;
    }

    fn choose(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.open = false;
        if self.value.as_ref() == Some(&path) {
            return None;
        }
        self.value = Some(path.clone());
        Some(path)
    }

    fn cancel(&mut self) {
        self.open = false;
    }
}

/// Owns the active FileSet and the generation that identifies it.
#[derive(Debug, Clone, Default)]
pub struct FileAcquisition {
    files: Option<FileSet>,
    generation: Generation,
    picker: FilePicker,
}

impl FileAcquisition {
    pub fn files(&self) -> Option<&FileSet> {
        self.files.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    /// Replaces the FileSet when the source holds at least one non-empty file.
    pub fn acquire(&mut self, source: AcquireSource) -> Result<Generation, AcquireError> {
        let label = source.label();
        let files = FileSet::from_files(source.into_files()).ok_or(AcquireError::Empty)?;

        self.generation = self.generation.next();
        info!(
            source = label,
            generation = self.generation.value(),
            files = ?files.names(),
            "file set replaced"
        );
        self.files = Some(files);
        Ok(self.generation)
    }

    pub fn request_manual_selection(&mut self) {
        self.picker.open();
    }

    /// Feeds the picker's choice. Returns the path when it is a change.
    pub fn choose_file(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.picker.choose(path)
    }

    pub fn cancel_selection(&mut self) {
        self.picker.cancel();
    }
}
