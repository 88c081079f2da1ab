use loxe_core::value::Value;
use std::{fmt, ops::Range};

use super::token::Token;

/// A visitor over the loxe expression tree. Each consumer of
/// the tree, the printer and the interpreter, implements this trait
pub trait Visitor {
  type Result;

  fn visit_expr(&mut self, expr: &Expr) -> Self::Result {
    match expr {
      Expr::Literal(literal) => self.visit_literal(literal),
      Expr::Grouping(grouping) => self.visit_grouping(grouping),
      Expr::Unary(unary) => self.visit_unary(unary),
      Expr::Binary(binary) => self.visit_binary(binary),
    }
  }

  fn visit_literal(&mut self, literal: &Literal) -> Self::Result;
  fn visit_grouping(&mut self, grouping: &Grouping) -> Self::Result;
  fn visit_unary(&mut self, unary: &Unary) -> Self::Result;
  fn visit_binary(&mut self, binary: &Binary) -> Self::Result;
}

/// An object that can specify it's start and end position and optionally the full range
/// Implementors of ranges only need to implement `start` ad `end`
pub trait Spanned {
  /// The starting offset of this node
  fn start(&self) -> u32;

  /// The ending offset of this node
  fn end(&self) -> u32;

  /// The full range of this node
  fn span(&self) -> Span {
    Span {
      start: self.start(),
      end: self.end(),
    }
  }
}

/// Representing the start and end of a node
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
pub struct Span {
  pub start: u32,
  pub end: u32,
}

impl Span {
  pub fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }
}

impl From<Span> for Range<usize> {
  fn from(span: Span) -> Self {
    (span.start as usize)..(span.end as usize)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
  Literal(Box<Literal<'a>>),
  Grouping(Box<Grouping<'a>>),
  Unary(Box<Unary<'a>>),
  Binary(Box<Binary<'a>>),
}

impl<'a> Spanned for Expr<'a> {
  fn start(&self) -> u32 {
    match self {
      Expr::Literal(literal) => literal.start(),
      Expr::Grouping(grouping) => grouping.start(),
      Expr::Unary(unary) => unary.start(),
      Expr::Binary(binary) => binary.start(),
    }
  }

  fn end(&self) -> u32 {
    match self {
      Expr::Literal(literal) => literal.end(),
      Expr::Grouping(grouping) => grouping.end(),
      Expr::Unary(unary) => unary.end(),
      Expr::Binary(binary) => binary.end(),
    }
  }
}

/// A number, string, boolean or nil literal
#[derive(Debug, Clone, PartialEq)]
pub struct Literal<'a> {
  pub token: Token<'a>,
  pub value: Value,
}

impl<'a> Literal<'a> {
  pub fn new(token: Token<'a>, value: Value) -> Self {
    Self { token, value }
  }
}

impl<'a> Spanned for Literal<'a> {
  fn start(&self) -> u32 {
    self.token.start()
  }

  fn end(&self) -> u32 {
    self.token.end()
  }
}

/// A parenthesized expression
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<'a> {
  pub span: Span,
  pub expr: Expr<'a>,
}

impl<'a> Grouping<'a> {
  pub fn new(span: Span, expr: Expr<'a>) -> Self {
    Self { span, expr }
  }
}

impl<'a> Spanned for Grouping<'a> {
  fn start(&self) -> u32 {
    self.span.start
  }

  fn end(&self) -> u32 {
    self.span.end
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
  Not,
  Negate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary<'a> {
  pub op: UnaryOp,
  pub operator: Token<'a>,
  pub expr: Expr<'a>,
}

impl<'a> Unary<'a> {
  pub fn new(op: UnaryOp, operator: Token<'a>, expr: Expr<'a>) -> Self {
    Self { op, operator, expr }
  }
}

impl<'a> Spanned for Unary<'a> {
  fn start(&self) -> u32 {
    self.operator.start()
  }

  fn end(&self) -> u32 {
    self.expr.end()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Lt,
  LtEq,
  Gt,
  GtEq,
  Eq,
  Ne,
}

impl fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Lt => "<",
      BinaryOp::LtEq => "<=",
      BinaryOp::Gt => ">",
      BinaryOp::GtEq => ">=",
      BinaryOp::Eq => "==",
      BinaryOp::Ne => "!=",
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary<'a> {
  pub op: BinaryOp,
  pub operator: Token<'a>,
  pub lhs: Expr<'a>,
  pub rhs: Expr<'a>,
}

impl<'a> Binary<'a> {
  pub fn new(op: BinaryOp, operator: Token<'a>, lhs: Expr<'a>, rhs: Expr<'a>) -> Binary<'a> {
    Self {
      op,
      operator,
      lhs,
      rhs,
    }
  }
}

impl<'a> Spanned for Binary<'a> {
  fn start(&self) -> u32 {
    self.lhs.start()
  }

  fn end(&self) -> u32 {
    self.rhs.end()
  }
}
