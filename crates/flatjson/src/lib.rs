//! A resumable, zero-copy streaming JSON parser over a flat, pre-sized
//! node arena.
//!
//! [`Parser`] consumes arbitrarily-chunked byte input and appends fixed-size
//! [`Node`] records into a caller-owned arena; no allocation happens on that
//! hot path. Each node carries a `(offset, len)` back-reference into the
//! caller's own buffer rather than owning or copying its text, and
//! containers carry a sibling-skip distance so [`arena::next_sibling`] (and
//! everything built on it — [`arena::array_element`], [`arena::object_lookup`],
//! [`serialize`]) can step over a nested subtree in O(1) without walking it.
//!
//! [`Builder`] builds the same arena shape by hand, for constructing
//! documents programmatically instead of parsing them. [`accessors`]
//! coerces a node's text to `i64`/`f64`/`bool`/a copied byte buffer, and
//! [`diagnostic::format_error`] renders a [`ParserError`] as a short,
//! caret-annotated context snippet.

#![no_std]
#![deny(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod accessors;
pub mod arena;
mod buffer;
mod builder;
mod diagnostic;
mod error;
mod escape;
pub mod hash;
mod literal;
mod node;
mod parser;
mod serializer;

pub use accessors::{as_bool, as_f64, as_i64, str_copy};
pub use buffer::{DEFAULT_MAX_CAPACITY, OutputBuffer};
pub use builder::Builder;
pub use diagnostic::format_error;
pub use error::{BuilderError, ErrorKind, ParserError};
pub use node::{Node, NodeKind, Text};
pub use parser::Parser;
pub use serializer::{Style, serialize, serialize_to_fmt};

#[cfg(feature = "std")]
pub use serializer::dump;
