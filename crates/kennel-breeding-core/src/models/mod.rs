//! Domain models for the kennel breeding engine.

mod animal;
mod genetics;
mod records;
mod summary;

pub use animal::*;
pub use genetics::*;
pub use records::*;
pub use summary::*;
