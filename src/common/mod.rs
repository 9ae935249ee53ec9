//! Common types, traits, and error definitions for rigid_body_controls
//!
//! This module provides the foundational building blocks shared by the
//! planning components.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
