// Layout and timing constants shared by the picker and the views.

/// Number of frame slots when the config does not say otherwise
pub const DEFAULT_SLOT_COUNT: usize = 5;

/// Quiet period after the last keystroke before a search fires, in milliseconds
pub const SEARCH_DEBOUNCE_MS: u64 = 2000;

/// Queries with fewer characters than this never reach the search service
pub const MIN_QUERY_CHARS: usize = 3;

/// Hint shown in the empty search box
pub const SEARCH_HINT: &str = "Search for a game or character";

/// Label drawn inside an empty frame
pub const EMPTY_FRAME_LABEL: &str = "Click to Add";

/// UI spacing constants
pub mod spacing {
    /// Small spacing (4px)
    pub const SMALL: f32 = 4.0;

    /// Medium spacing (8px)
    pub const MEDIUM: f32 = 8.0;

    /// Large spacing (16px)
    pub const LARGE: f32 = 16.0;
}

/// Frame row layout
pub mod frame {
    /// Frame width in logical pixels
    pub const WIDTH: f32 = 160.0;

    /// Frame height in logical pixels
    pub const HEIGHT: f32 = 220.0;

    /// Gap between frames in the row
    pub const GAP: f32 = 16.0;

    /// Corner rounding of frames
    pub const ROUNDING: f32 = 8.0;

    /// Border width of the active frame
    pub const ACTIVE_STROKE: f32 = 2.0;
}

/// Search result list layout
pub mod results {
    /// Thumbnail edge in logical pixels
    pub const THUMB_SIZE: f32 = 48.0;

    /// Row rounding
    pub const ROUNDING: f32 = 6.0;
}
