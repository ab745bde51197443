// Constants for rendering
pub const CURSOR_INDICATOR: char = '▌';
pub const STATUS_SEARCH_PREFIX: &str = "Search: ";
pub const STATUS_PICK_PREFIX: &str = "Open: ";
pub const ELLIPSIS: char = '…';

// Layout
pub const ASIDE_WIDTH: u16 = 42;
pub const DIALOG_MAX_WIDTH: u16 = 64;
pub const DIALOG_MAX_HEIGHT: u16 = 24;

// Content area
pub const LOADING_TEXT: &str = "Loading model…";
pub const RENDERING_TEXT: &str = "Rendering…";
pub const UPLOADER_TITLE: &str = " Open a model ";

// Display toggles
pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";
