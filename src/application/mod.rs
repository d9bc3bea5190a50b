//! # Application Layer
//!
//! The generation port and the use cases that drive it.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
