//! Structure parser backends and the generation pipeline
//!
//! Each parser implements [`crate::core::StructureParser`] for one input
//! format; the generator runs any of them over a directory.

pub mod generator;
pub mod json;
pub mod sourcekitten;

pub use generator::*;
pub use json::*;
pub use sourcekitten::*;
