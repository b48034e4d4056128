//! Prelude module: `mathcore::prelude` re-exports all `rayprim::mathcore` items.
//!
//! # Examples
//! Import all the exports.
//!
//! ```rust
//! use rayprim::mathcore::prelude::*;
//! ```
//!

// re-exports
pub use crate::mathcore::floats::*;
pub use crate::mathcore::interop::*;
pub use crate::mathcore::lines::*;
pub use crate::mathcore::rays::*;
pub use crate::mathcore::shapes::*;
pub use crate::mathcore::vectors::*;
pub use crate::mathcore::*;
