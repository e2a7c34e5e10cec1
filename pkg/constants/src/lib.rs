//! Centralized constants for the NAM migration tool.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod api;
pub mod converter;
pub mod extensions;
pub mod paths;
