#![deny(clippy::all)]

pub mod value;
