use super::{
  error::{RuntimeError, RuntimeResult},
  interpreter::Interpreter,
};
use crate::compiler::ir::token::Token;
use loxe_core::{val, value::Value};

const NUMBER_OPERAND: &str = "Operand must be a number.";
const NUMBER_OPERANDS: &str = "Operands must be numbers.";
const ADD_OPERANDS: &str = "Operands must be two numbers or two strings.";

impl Interpreter {
  /// Negate a number
  pub(super) fn op_negate(&self, operator: &Token, value: Value) -> RuntimeResult<Value> {
    match value.to_num() {
      Some(num) => Ok(val!(-num)),
      None => Err(RuntimeError::new(operator, NUMBER_OPERAND)),
    }
  }

  /// Invert the truthiness of a value
  pub(super) fn op_not(&self, value: Value) -> RuntimeResult<Value> {
    Ok(val!(value.is_falsey()))
  }

  /// Add two numbers or concatenate two strings
  pub(super) fn op_add(&self, operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    match (lhs, rhs) {
      (Value::Number(lhs), Value::Number(rhs)) => Ok(val!(lhs + rhs)),
      (Value::String(mut lhs), Value::String(rhs)) => {
        lhs.push_str(&rhs);
        Ok(val!(lhs))
      },
      _ => Err(RuntimeError::new(operator, ADD_OPERANDS)),
    }
  }

  pub(super) fn op_sub(&self, operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs - rhs))
  }

  pub(super) fn op_mul(&self, operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs * rhs))
  }

  /// Divide two numbers, division by zero follows IEEE 754
  pub(super) fn op_div(&self, operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs / rhs))
  }

  pub(super) fn op_less(&self, operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs < rhs))
  }

  pub(super) fn op_less_equal(
    &self,
    operator: &Token,
    lhs: Value,
    rhs: Value,
  ) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs <= rhs))
  }

  pub(super) fn op_greater(
    &self,
    operator: &Token,
    lhs: Value,
    rhs: Value,
  ) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs > rhs))
  }

  pub(super) fn op_greater_equal(
    &self,
    operator: &Token,
    lhs: Value,
    rhs: Value,
  ) -> RuntimeResult<Value> {
    let (lhs, rhs) = self.num_operands(operator, &lhs, &rhs)?;
    Ok(val!(lhs >= rhs))
  }

  /// Equality never coerces and never fails
  pub(super) fn op_equal(&self, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    Ok(val!(lhs == rhs))
  }

  pub(super) fn op_not_equal(&self, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    Ok(val!(lhs != rhs))
  }

  /// Extract both operands as numbers
  fn num_operands(&self, operator: &Token, lhs: &Value, rhs: &Value) -> RuntimeResult<(f64, f64)> {
    match (lhs.to_num(), rhs.to_num()) {
      (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
      _ => Err(RuntimeError::new(operator, NUMBER_OPERANDS)),
    }
  }
}
