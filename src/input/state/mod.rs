mod actions;
mod core;
mod mouse;
mod placement;
mod render;

pub use core::{
    Editor, EditorSettings, InteractionState, MAX_ITEM_SCALE, MIN_ITEM_SCALE, PlacementRequest,
};
pub use placement::PlacementOutcome;
