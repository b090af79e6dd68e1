//! Shared test utilities for the b4x-actions workspace.
//!
//! This crate provides standardised project fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for a
//!   temporary B4X project tree

pub mod project;
