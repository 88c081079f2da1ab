use crate::{
  compiler::{
    ir::{
      ast::*,
      token::{Literal as TokenLiteral, Token, TokenKind},
    },
    syntax_error,
  },
  FeResult,
};
use codespan_reporting::diagnostic::Diagnostic;
use loxe_core::{
  val,
  value::{Value, VALUE_FALSE, VALUE_NIL, VALUE_TRUE},
};
use std::{mem, vec::IntoIter};

type ParseResult<T, F> = Result<T, Diagnostic<F>>;

const EQUALITY: [(TokenKind, BinaryOp); 2] = [
  (TokenKind::BangEqual, BinaryOp::Ne),
  (TokenKind::EqualEqual, BinaryOp::Eq),
];

const COMPARISON: [(TokenKind, BinaryOp); 4] = [
  (TokenKind::Greater, BinaryOp::Gt),
  (TokenKind::GreaterEqual, BinaryOp::GtEq),
  (TokenKind::Less, BinaryOp::Lt),
  (TokenKind::LessEqual, BinaryOp::LtEq),
];

const TERM: [(TokenKind, BinaryOp); 2] = [
  (TokenKind::Minus, BinaryOp::Sub),
  (TokenKind::Plus, BinaryOp::Add),
];

const FACTOR: [(TokenKind, BinaryOp); 2] = [
  (TokenKind::Slash, BinaryOp::Div),
  (TokenKind::Star, BinaryOp::Mul),
];

const UNARY: [(TokenKind, UnaryOp); 2] = [
  (TokenKind::Bang, UnaryOp::Not),
  (TokenKind::Minus, UnaryOp::Negate),
];

/// The loxe parser. This structure produces the loxe
/// expression tree from a scanned token stream
pub struct Parser<'a, FileId> {
  /// The current token
  current: Token<'a>,

  /// The previous token
  previous: Token<'a>,

  /// The remaining tokens
  tokens: IntoIter<Token<'a>>,

  /// The final eof token, repeated once the stream is exhausted
  eof: Token<'a>,

  /// file id
  file_id: FileId,
}

impl<'a, FileId: Copy> Parser<'a, FileId> {
  /// Create a new parser over the provided tokens. An eof token
  /// is appended if the stream does not already end with one
  pub fn new(tokens: Vec<Token<'a>>, file_id: FileId) -> Self {
    let eof = match tokens.last() {
      Some(last) if last.kind() == TokenKind::Eof => *last,
      Some(last) => Token::new(TokenKind::Eof, "", None, last.line(), last.end(), last.end()),
      None => Token::new(TokenKind::Eof, "", None, 1, 0, 0),
    };

    let mut tokens = tokens.into_iter();
    let current = tokens.next().unwrap_or(eof);

    Self {
      current,
      previous: eof,
      tokens,
      eof,
      file_id,
    }
  }

  /// Parse the tokens into a single loxe expression. Parsing
  /// stops at the first syntax error and any tokens after a
  /// complete expression are left unread
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::compiler::{Parser, Scanner};
  ///
  /// let scanned = Scanner::new("3 / 2 + 10").scan_tokens(0);
  ///
  /// let parser = Parser::new(scanned.tokens, 0);
  /// assert_eq!(parser.parse().is_ok(), true);
  /// ```
  pub fn parse(mut self) -> FeResult<Expr<'a>, FileId> {
    self.expression().map_err(|err| vec![err])
  }

  fn expression(&mut self) -> ParseResult<Expr<'a>, FileId> {
    self.equality()
  }

  fn equality(&mut self) -> ParseResult<Expr<'a>, FileId> {
    self.binary(Self::comparison, &EQUALITY)
  }

  fn comparison(&mut self) -> ParseResult<Expr<'a>, FileId> {
    self.binary(Self::term, &COMPARISON)
  }

  fn term(&mut self) -> ParseResult<Expr<'a>, FileId> {
    self.binary(Self::factor, &TERM)
  }

  fn factor(&mut self) -> ParseResult<Expr<'a>, FileId> {
    self.binary(Self::unary, &FACTOR)
  }

  /// Parse a left associative binary level, folding each
  /// new operand onto the expression so far
  fn binary(
    &mut self,
    operand: fn(&mut Self) -> ParseResult<Expr<'a>, FileId>,
    operators: &[(TokenKind, BinaryOp)],
  ) -> ParseResult<Expr<'a>, FileId> {
    let mut expr = operand(self)?;

    while let Some(op) = self.match_operator(operators) {
      let operator = self.previous;
      let rhs = operand(self)?;

      expr = Expr::Binary(Box::new(Binary::new(op, operator, expr, rhs)));
    }

    Ok(expr)
  }

  fn unary(&mut self) -> ParseResult<Expr<'a>, FileId> {
    match self.match_operator(&UNARY) {
      Some(op) => {
        let operator = self.previous;
        let expr = self.unary()?;

        Ok(Expr::Unary(Box::new(Unary::new(op, operator, expr))))
      },
      None => self.primary(),
    }
  }

  fn primary(&mut self) -> ParseResult<Expr<'a>, FileId> {
    let token = self.current;

    let value = match token.kind() {
      TokenKind::False => VALUE_FALSE,
      TokenKind::True => VALUE_TRUE,
      TokenKind::Nil => VALUE_NIL,
      TokenKind::Number | TokenKind::String => match token.literal() {
        Some(TokenLiteral::Number(num)) => val!(num),
        Some(TokenLiteral::String(string)) => val!(string),
        None => return Err(self.error_current("Expect expression.")),
      },
      TokenKind::LeftParen => return self.grouping(),
      _ => return Err(self.error_current("Expect expression.")),
    };

    self.advance();
    Ok(Expr::Literal(Box::new(Literal::new(token, value))))
  }

  fn grouping(&mut self) -> ParseResult<Expr<'a>, FileId> {
    let open = self.current;
    self.advance();

    let expr = self.expression()?;
    let close = self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;

    Ok(Expr::Grouping(Box::new(Grouping::new(
      Span::new(open.start(), close.end()),
      expr,
    ))))
  }

  /// If the current token is one of the provided operators advance
  /// and return the operator
  fn match_operator<T: Copy>(&mut self, operators: &[(TokenKind, T)]) -> Option<T> {
    let kind = self.current.kind();

    operators
      .iter()
      .find(|(operator, _)| *operator == kind)
      .map(|(_, op)| *op)
      .map(|op| {
        self.advance();
        op
      })
  }

  /// Does the provided token kind match the current kind
  #[inline]
  fn check(&self, kind: TokenKind) -> bool {
    self.current.kind() == kind
  }

  /// Advance the parser a token forward
  #[inline]
  fn advance(&mut self) {
    let next = self.tokens.next().unwrap_or(self.eof);
    self.previous = mem::replace(&mut self.current, next);
  }

  /// Consume a token of the expected kind returning it
  #[inline]
  fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token<'a>, FileId> {
    if self.check(kind) {
      self.advance();
      return Ok(self.previous);
    }

    Err(self.error_current(message))
  }

  /// Indicate an error occurred at the current token
  fn error_current(&self, message: &str) -> Diagnostic<FileId> {
    self.error_at(self.current, message)
  }

  /// Build a diagnostic naming the offending token
  fn error_at(&self, token: Token<'a>, message: &str) -> Diagnostic<FileId> {
    let location = match token.kind() {
      TokenKind::Eof => "Error at end".to_string(),
      _ => format!("Error at '{}'", token.str()),
    };

    syntax_error(self.file_id, message, &location, token.span(), token.line())
  }
}
