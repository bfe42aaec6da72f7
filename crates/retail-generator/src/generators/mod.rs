//! Field-level generators used by the document factory.

pub mod items;
pub mod timestamp;
pub mod uuid;
