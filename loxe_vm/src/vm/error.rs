use std::{error::Error, fmt};

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::compiler::ir::{
  ast::{Span, Spanned},
  token::Token,
};

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// An error raised while evaluating an expression. It records
/// the location of the operator that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
  message: String,
  span: Span,
  line: u32,
}

impl RuntimeError {
  /// Create a new runtime error located at the provided operator
  pub fn new(operator: &Token, message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      span: operator.span(),
      line: operator.line(),
    }
  }

  #[inline]
  pub fn message(&self) -> &str {
    &self.message
  }

  #[inline]
  pub fn line(&self) -> u32 {
    self.line
  }

  #[inline]
  pub fn span(&self) -> Span {
    self.span
  }

  /// Convert this error into a diagnostic for the provided file
  pub fn to_diagnostic<FileId>(&self, file_id: FileId) -> Diagnostic<FileId> {
    Diagnostic::error()
      .with_message(&self.message)
      .with_labels(vec![Label::primary(file_id, self.span)])
      .with_notes(vec![format!("[line {}]", self.line)])
  }
}

impl fmt::Display for RuntimeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n[line {}]", self.message, self.line)
  }
}

impl Error for RuntimeError {}
