//! Host bridge crate for the scriptlet plugin.

pub mod api;
