//! Target-specific abstractions.
//!
//! - [`Backend`] - Main trait for code generation targets

mod traits;

pub use traits::Backend;
