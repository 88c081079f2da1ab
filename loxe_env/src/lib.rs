#![deny(clippy::all)]

pub mod fs;
pub mod io;
pub mod stdio;
