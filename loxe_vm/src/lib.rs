#![deny(clippy::all)]

pub mod compiler;
mod constants;
pub mod source;
pub mod vm;
use codespan_reporting::diagnostic::Diagnostic;

#[cfg(any(test, feature = "debug"))]
mod debug;

/// The result of a front end stage
pub type FeResult<T, F> = Result<T, Vec<Diagnostic<F>>>;
