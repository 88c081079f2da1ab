use super::error::RuntimeResult;
use crate::compiler::ir::ast::*;
use loxe_core::value::Value;

/// A tree walking evaluator for loxe expressions. Children are
/// always evaluated before the operator that combines them
#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
  /// Evaluate an expression to its value
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::compiler::{Parser, Scanner};
  /// use loxe_vm::vm::Interpreter;
  /// use loxe_core::value::Value;
  ///
  /// let scanned = Scanner::new("1 + 2 * 3").scan_tokens(0);
  /// let expr = Parser::new(scanned.tokens, 0).parse().unwrap();
  ///
  /// let value = Interpreter::default().evaluate(&expr).unwrap();
  /// assert_eq!(value, Value::Number(7.0));
  /// ```
  pub fn evaluate(&mut self, expr: &Expr) -> RuntimeResult<Value> {
    self.visit_expr(expr)
  }

  /// Evaluate an expression converting the result to its display text
  pub fn interpret(&mut self, expr: &Expr) -> RuntimeResult<String> {
    self.evaluate(expr).map(|value| value.to_string())
  }
}

impl Visitor for Interpreter {
  type Result = RuntimeResult<Value>;

  fn visit_literal(&mut self, literal: &Literal) -> Self::Result {
    Ok(literal.value.clone())
  }

  fn visit_grouping(&mut self, grouping: &Grouping) -> Self::Result {
    self.visit_expr(&grouping.expr)
  }

  fn visit_unary(&mut self, unary: &Unary) -> Self::Result {
    let value = self.visit_expr(&unary.expr)?;

    match unary.op {
      UnaryOp::Not => self.op_not(value),
      UnaryOp::Negate => self.op_negate(&unary.operator, value),
    }
  }

  fn visit_binary(&mut self, binary: &Binary) -> Self::Result {
    let lhs = self.visit_expr(&binary.lhs)?;
    let rhs = self.visit_expr(&binary.rhs)?;
    let operator = &binary.operator;

    match binary.op {
      BinaryOp::Add => self.op_add(operator, lhs, rhs),
      BinaryOp::Sub => self.op_sub(operator, lhs, rhs),
      BinaryOp::Mul => self.op_mul(operator, lhs, rhs),
      BinaryOp::Div => self.op_div(operator, lhs, rhs),
      BinaryOp::Lt => self.op_less(operator, lhs, rhs),
      BinaryOp::LtEq => self.op_less_equal(operator, lhs, rhs),
      BinaryOp::Gt => self.op_greater(operator, lhs, rhs),
      BinaryOp::GtEq => self.op_greater_equal(operator, lhs, rhs),
      BinaryOp::Eq => self.op_equal(lhs, rhs),
      BinaryOp::Ne => self.op_not_equal(lhs, rhs),
    }
  }
}
