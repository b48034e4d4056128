//! # rayprim
//!
//! **rayprim** - ray intersections against planes, spheres and cones written in pure Rust.
//!

#![warn(missing_docs, clippy::missing_docs_in_private_items)] // `missing_docs`
#![warn(unused_import_braces, unused_qualifications, unused_results)] // `unused_*`
#![warn(trivial_casts, trivial_numeric_casts)] // `casts`
#![warn(missing_copy_implementations, missing_debug_implementations)] // `missing_*_implementations`
#![warn(variant_size_differences, unreachable_pub)]

// crates
extern crate log;

extern crate serde;
extern crate serde_json;

// cores
pub mod mathcore;
