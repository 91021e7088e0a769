//! Host value model shared by all snippet functions.
//!
//! # Responsibility
//! - Define the tagged value shapes exchanged with the embedding host.
//! - Keep numeric promotion rules in one place.
//!
//! # Invariants
//! - Every host value is one of the variants in [`value::Value`]; there is
//!   no open-ended dynamic dispatch over unknown shapes.
//! - A [`record::Record`] always holds as many values as field names.

pub mod number;
pub mod record;
pub mod value;
