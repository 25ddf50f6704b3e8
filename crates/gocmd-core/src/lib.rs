//! # gocmd-core
//!
//! Catalog types and error types shared across gocmd crates.
//!
//! This crate provides the types every other gocmd crate agrees on:
//! - The catalog of exposed functions handed to code generators
//! - The closed enumeration of basic parameter kinds
//! - The policy for parameters a command cannot accept
//! - Cross-cutting error types

pub mod catalog;
pub mod enums;
pub mod errors;

pub use catalog::{Catalog, ExposedFunction, Parameter, SourceLocation};
pub use enums::{BasicKind, UnsafePointerPolicy};
pub use errors::CoreError;
