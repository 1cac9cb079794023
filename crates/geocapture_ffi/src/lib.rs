//! Flutter-facing bindings for geocapture core.

pub mod api;
