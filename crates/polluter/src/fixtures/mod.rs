//! Fixture loading.
//!
//! Decodes fixture documents into [`Collections`](crate::model::Collections)
//! ready for [`Engine::build`](crate::Engine::build).

mod format;
mod parser;

pub use format::FixtureFormat;
pub use parser::FixtureParser;

pub(crate) use parser::{format_for, read_error};
