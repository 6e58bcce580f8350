//! Integration test crate for Cutline.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the core, timeline, and ui crates to verify they work
//! together.

#[cfg(test)]
mod interaction;

#[cfg(test)]
mod timeline;
