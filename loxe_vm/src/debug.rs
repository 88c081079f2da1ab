use crate::compiler::ir::{ast::Expr, token::Token, AstPrint};
use loxe_env::stdio::Stdio;
use std::io::{self, Write};

/// Write each token on its own line as `KIND lexeme literal`
pub fn print_tokens(stdio: &mut Stdio, tokens: &[Token]) -> io::Result<()> {
  let stdout = stdio.stdout();

  writeln!(stdout, "Tokens:")?;
  for token in tokens {
    writeln!(stdout, "  {}", token)?;
  }

  Ok(())
}

/// Write the parenthesized form of an expression
pub fn print_ast(stdio: &mut Stdio, expr: &Expr) -> io::Result<()> {
  let mut printer = AstPrint::default();
  writeln!(stdio.stdout(), "Ast:\n  {}", printer.print(expr))
}
