use crate::search::SearchResult;

mod frames;
mod search_panel;

pub use frames::draw_frames;
pub use search_panel::draw_search_panel;

/// User actions collected while drawing a frame; the app applies them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    ActivateSlot(usize),
    QueryChanged(String),
    Submit,
    Select(SearchResult),
}
