//! Word-embedding capability.
//!
//! - `model`: the `EmbeddingModel` trait the clue engine is written against
//! - `vectors`: `VectorModel`, an in-memory cosine-similarity implementation

pub mod model;
pub mod vectors;

pub use model::{EmbeddingError, EmbeddingModel, Neighbor};
pub use vectors::VectorModel;
