//! Network entry point.

pub mod listener;
