//! # Appcontext Support
//!
//! Shared utilities for the appcontext IoC crates.
//!
//! This crate provides:
//! - Text rendering for dependency chains in error messages
//! - "Did you mean?" suggestions for unknown object ids

pub mod rendering;
