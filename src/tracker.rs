mod crossing;
mod direction;
mod line_counter;
mod matching;
mod rect;
mod track;

pub use crossing::CountingLines;
pub use direction::{CrossingKind, MovementDirection};
pub use line_counter::{CounterConfig, Counts, LineCounter};
pub use matching::{Detection, PERSON_CLASS_ID};
pub use rect::Rect;
pub use track::Track;
