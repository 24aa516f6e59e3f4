//! Shared helpers for end-to-end pipeline tests.

pub mod setup;
