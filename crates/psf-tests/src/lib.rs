//! Integration tests for PSF-RS crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the image, I/O, and filtering crates.
