pub mod ir;
mod parser;
mod scanner;

pub use parser::Parser;
pub use scanner::{ScanResult, Scanner};

use codespan_reporting::diagnostic::{Diagnostic, Label};
use ir::ast::Span;

/// Build a lexical or syntax error diagnostic. The primary label
/// carries the location, `Error`, `Error at end` or `Error at 'x'`
/// and the note carries the single line report
pub(crate) fn syntax_error<FileId>(
  file_id: FileId,
  message: &str,
  location: &str,
  span: Span,
  line: u32,
) -> Diagnostic<FileId> {
  Diagnostic::error()
    .with_message(message)
    .with_labels(vec![
      Label::primary(file_id, span).with_message(location)
    ])
    .with_notes(vec![format!("[line {}] {}: {}", line, location, message)])
}
