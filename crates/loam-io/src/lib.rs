//! Textual persistence for named parameter tensors.
//!
//! Parameters are written as line-oriented records, two lines each:
//!
//! ```text
//! #Parameter# /mlp/W 2 4 2 8
//! 0.5 0.5 0.5 0.5 0.5 0.5 0.5 0.5
//! ```
//!
//! The header carries the fully-qualified name, the number of dimensions,
//! each dimension size, and the total element count; the second line holds
//! the values. [`TextSaver`] writes every parameter whose name starts with
//! a key prefix; [`TextLoader`] fills already-constructed parameters of
//! matching name and shape, in file order.
//!
//! Both ends are generic over the stream (`Write` / `BufRead`) so tests
//! run against in-memory buffers and production code uses buffered files.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
mod format;
pub mod loader;
pub mod saver;

pub use error::IoError;
pub use loader::TextLoader;
pub use saver::TextSaver;
