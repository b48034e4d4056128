//! `rayprim::mathcore` module is a core that implements all math functionality for the crate.
//!
//! # Prelude
//! `rayprim::mathcore` prelude can be imported with `use rayprim::mathcore::prelude::*`.
//!
//! # Model
//! Vectors represent both points and directions in space.
//! Shapes (planes, spheres and cones) are immutable values that are anchored at their origin,
//! and rays are the only objects that know how to intersect them.
//! Every intersection is a pure function of a ray and a shape: absence of an intersection is an
//! empty result and degenerate input propagates IEEE-754 special values instead of failing.
//!
//! Floating point comparison throughout the core is relaxed (see [`floats`]),
//! so `==` on vectors tolerates small relative error.
//!

// submodules and public re-exports
mod ext;
pub use ext::*;

pub mod floats;
pub mod interop;
pub mod lines;
pub mod rays;
pub mod shapes;
pub mod vectors;

// prelude
pub mod prelude;
