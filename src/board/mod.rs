//! Board construction and card state.
//!
//! - `words`: word sources (trait + newline-delimited list)
//! - `card`: a single card and its guesser projection
//! - `grid`: the dealt 25-card board

pub mod words;
pub mod card;
pub mod grid;

pub use words::{WordList, WordSource};
pub use card::{Card, CardView};
pub use grid::Board;
