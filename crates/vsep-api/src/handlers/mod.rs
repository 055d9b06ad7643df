//! Request handlers.

pub mod download;
pub mod health;
pub mod separate;

pub use download::download_stem;
pub use health::{health, ready, root};
pub use separate::separate_audio;
