//! `mathcore::interop` submodule provides textual representation of `rayprim` values.
//!
//! Every primitive derives `serde::Serialize`, and [`ToJson`] turns it into compact JSON
//! object. Keys follow the order in which fields are declared, so the output is deterministic:
//! a sphere is written as `{"radius":..,"origin":{"x":..,"y":..,"z":..}}`.
//!
//! Restoring values from text is not supported.
//!

use serde::Serialize;
use std::io::{Error, ErrorKind};

/// [`ToJson`] trait is implemented on objects that can be written as JSON text.
///
/// There is an auto implementation on all types that implement `serde::Serialize`.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::interop::ToJson;
/// # use rayprim::mathcore::vectors::Vector3;
/// let text: String = Vector3::new(1.0, -2.0, 0.5).to_json().expect("Vectors are serializable");
/// assert_eq!(text, r#"{"x":1.0,"y":-2.0,"z":0.5}"#);
/// ```
///
pub trait ToJson {
    /// Serializes object to JSON text.
    ///
    fn to_json(&self) -> Result<String, Error>;
}
impl<T: Serialize + ?Sized> ToJson for T {
    /// Writes data as compact JSON.
    ///
    /// This function fails if data is not representable in JSON
    /// (for example, map keys that are not strings).
    /// Non-finite floats are written as `null`.
    ///
    fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|error| Error::new(ErrorKind::InvalidData, error.to_string()))
    }
}
