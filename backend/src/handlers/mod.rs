//! HTTP handlers for the Together Apart site

pub mod business;
pub mod health;
pub mod submit;

pub use business::*;
pub use health::*;
pub use submit::*;
