//! Domain models for the business directory

mod business;
mod option;
mod submission;

pub use business::*;
pub use option::*;
pub use submission::*;
