//! Shared primitives for the ddm distance-difference matrix tools.
//!
//! `ddm-core` provides the foundation the other ddm crates build on:
//!
//! - **Error types** — [`DdmError`] and [`Result`] for structured error handling
//! - **Traits** — [`Summarizable`] and [`Annotated`]

pub mod error;
pub mod traits;

pub use error::{DdmError, Result};
pub use traits::*;
