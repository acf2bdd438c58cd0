#![doc = include_str!("../README.md")]

pub mod isochrone;
pub use isochrone::*;
