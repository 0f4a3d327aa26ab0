//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod commits;
pub mod controls;
pub mod footer;
pub mod header;
pub mod json;
pub mod logs;
pub mod stats;
