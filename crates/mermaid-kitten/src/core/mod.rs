//! Core abstractions for diagram generation
//!
//! The declaration tree model, the per-node statement emitter, the tree
//! walker and the accumulator that assembles the final document, plus the
//! boundary pieces (discovery, parser trait, output) they plug into.

mod accumulator;
mod config;
mod declaration;
mod discovery;
mod emitter;
mod error;
pub mod logging;
mod output;
mod parser;
mod statement;
mod walker;

pub use accumulator::*;
pub use config::*;
pub use declaration::*;
pub use discovery::*;
pub use emitter::*;
pub use error::*;
pub use logging::*;
pub use output::*;
pub use parser::*;
pub use statement::*;
pub use walker::*;
