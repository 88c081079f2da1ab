use super::ast::*;

/// Prints an expression tree in a fully parenthesized prefix form
#[derive(Default)]
pub struct AstPrint {
  buffer: String,
}

impl AstPrint {
  fn reset(&mut self) {
    self.buffer.clear();
  }

  /// Print the provided expression returning the printed str
  pub fn print(&mut self, expr: &Expr) -> &str {
    self.reset();
    self.visit_expr(expr);
    &self.buffer
  }

  pub fn str(&self) -> &str {
    &self.buffer
  }

  fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) {
    self.buffer.push('(');
    self.buffer.push_str(name);

    for expr in exprs {
      self.buffer.push(' ');
      self.visit_expr(expr);
    }

    self.buffer.push(')');
  }
}

impl Visitor for AstPrint {
  type Result = ();

  fn visit_literal(&mut self, literal: &Literal) -> Self::Result {
    self.buffer.push_str(&literal.value.to_string());
  }

  fn visit_grouping(&mut self, grouping: &Grouping) -> Self::Result {
    self.parenthesize("group", &[&grouping.expr]);
  }

  fn visit_unary(&mut self, unary: &Unary) -> Self::Result {
    self.parenthesize(unary.operator.str(), &[&unary.expr]);
  }

  fn visit_binary(&mut self, binary: &Binary) -> Self::Result {
    self.parenthesize(binary.operator.str(), &[&binary.lhs, &binary.rhs]);
  }
}
