//! Program documents.
//!
//! A program can be written as a stream of YAML documents, one declaration
//! each, holding the already-desugared data model: integers are numerals,
//! strings are symbols, sequences are compound terms and `{mark: t}` marks
//! a subterm. Documents are deserialized with `serde-saphyr` using strict
//! unknown-key rejection, then validated and lowered into a [`Program`].
//!
//! [`Program`]: crate::Program

mod loader;
mod raw;
mod validate;

pub use loader::{load_options, load_program, load_program_with_source};
