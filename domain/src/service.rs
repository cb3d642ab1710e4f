pub mod align;
pub mod summary;
pub mod timecode;

pub use align::{align, render_dialogue, render_line};
pub use summary::extract;
pub use timecode::format_mmss;
