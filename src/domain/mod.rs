//! # Domain Layer
//!
//! Progression requests and results, plus the error taxonomy shared by every
//! generation backend. Independent of HTTP and serialization details of any
//! particular backend.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
