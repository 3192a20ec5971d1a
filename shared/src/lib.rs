//! Shared types and models for the Together Apart business directory
//!
//! This crate contains the pure domain logic shared between the site backend
//! and the browser form (via WASM): business records, selectable options,
//! submission form values, validation, payload shaping and the form state
//! machine. Nothing in here performs I/O.

pub mod form;
pub mod models;
pub mod tags;
pub mod types;
pub mod validation;

pub use form::*;
pub use models::*;
pub use tags::*;
pub use types::*;
pub use validation::*;
