//! Line prefix formatting.
//!
//! A [`FormatTemplate`] is an ordered list of bracketed sections, each a run
//! of [`HeaderField`]s. Templates are assembled with [`FormatBuilder`] or
//! taken from a named scheme in [`SchemeRegistry`].

pub mod field;
pub mod scheme;
pub mod template;

pub use field::{FieldContext, HeaderField};
pub use scheme::SchemeRegistry;
pub use template::{FormatBuilder, FormatTemplate};
