//! Test utilities and fixtures for the trade journal workspace
//!
//! - Trade record factories
//! - Sample journal fixtures
//! - Float and range assertions
//! - Logging and temp-file helpers

pub mod assertions;
pub mod factories;
pub mod fixtures;
pub mod helpers;

pub use assertions::*;
pub use factories::*;
pub use fixtures::*;
pub use helpers::*;
