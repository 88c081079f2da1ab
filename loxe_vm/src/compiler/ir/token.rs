use super::ast::Spanned;
use loxe_core::value::number_text;
use std::fmt;
use variant_count::VariantCount;

/// The literal value carried by a number or string token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
  Number(f64),
  String(&'a str),
}

impl<'a> fmt::Display for Literal<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Literal::Number(num) => f.write_str(&number_text(*num)),
      Literal::String(string) => f.write_str(string),
    }
  }
}

/// A token in the loxe language
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
  /// The token kind
  kind: TokenKind,

  /// The exact source slice of this token. For error
  /// tokens this is instead the error message
  lexeme: &'a str,

  /// The literal value of a number or string
  literal: Option<Literal<'a>>,

  /// The line this token ends on, starting at 1
  line: u32,

  /// the start offset of this token
  start: u32,

  /// The end offset of this token
  end: u32,
}

impl<'a> Token<'a> {
  pub const fn new(
    kind: TokenKind,
    lexeme: &'a str,
    literal: Option<Literal<'a>>,
    line: u32,
    start: u32,
    end: u32,
  ) -> Self {
    Self {
      kind,
      lexeme,
      literal,
      line,
      start,
      end,
    }
  }

  #[inline]
  pub fn str(&self) -> &'a str {
    self.lexeme
  }

  #[inline]
  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  #[inline]
  pub fn literal(&self) -> Option<Literal<'a>> {
    self.literal
  }

  #[inline]
  pub fn line(&self) -> u32 {
    self.line
  }
}

impl<'a> Spanned for Token<'a> {
  fn start(&self) -> u32 {
    self.start
  }

  fn end(&self) -> u32 {
    self.end
  }
}

impl<'a> fmt::Display for Token<'a> {
  /// Write this token as `KIND lexeme literal`
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.literal {
      Some(literal) => write!(f, "{} {} {}", self.kind.name(), self.lexeme, literal),
      None => write!(f, "{} {} null", self.kind.name(), self.lexeme),
    }
  }
}

/// Token kinds in the loxe language
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, VariantCount)]
#[repr(u8)]
pub enum TokenKind {
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,

  // logical operators
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,

  // sequences
  Identifier,
  String,
  Number,

  // keywords
  And,
  Class,
  Else,
  False,
  Fun,
  For,
  If,
  Nil,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Var,
  While,

  // meta
  Error,
  Eof,
}

impl TokenKind {
  /// The upper snake case name of this kind
  pub fn name(&self) -> &'static str {
    match self {
      TokenKind::LeftParen => "LEFT_PAREN",
      TokenKind::RightParen => "RIGHT_PAREN",
      TokenKind::LeftBrace => "LEFT_BRACE",
      TokenKind::RightBrace => "RIGHT_BRACE",
      TokenKind::Comma => "COMMA",
      TokenKind::Dot => "DOT",
      TokenKind::Minus => "MINUS",
      TokenKind::Plus => "PLUS",
      TokenKind::Semicolon => "SEMICOLON",
      TokenKind::Slash => "SLASH",
      TokenKind::Star => "STAR",
      TokenKind::Bang => "BANG",
      TokenKind::BangEqual => "BANG_EQUAL",
      TokenKind::Equal => "EQUAL",
      TokenKind::EqualEqual => "EQUAL_EQUAL",
      TokenKind::Greater => "GREATER",
      TokenKind::GreaterEqual => "GREATER_EQUAL",
      TokenKind::Less => "LESS",
      TokenKind::LessEqual => "LESS_EQUAL",
      TokenKind::Identifier => "IDENTIFIER",
      TokenKind::String => "STRING",
      TokenKind::Number => "NUMBER",
      TokenKind::And => "AND",
      TokenKind::Class => "CLASS",
      TokenKind::Else => "ELSE",
      TokenKind::False => "FALSE",
      TokenKind::Fun => "FUN",
      TokenKind::For => "FOR",
      TokenKind::If => "IF",
      TokenKind::Nil => "NIL",
      TokenKind::Or => "OR",
      TokenKind::Print => "PRINT",
      TokenKind::Return => "RETURN",
      TokenKind::Super => "SUPER",
      TokenKind::This => "THIS",
      TokenKind::True => "TRUE",
      TokenKind::Var => "VAR",
      TokenKind::While => "WHILE",
      TokenKind::Error => "ERROR",
      TokenKind::Eof => "EOF",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      TokenKind::LeftParen => "(",
      TokenKind::RightParen => ")",
      TokenKind::LeftBrace => "{",
      TokenKind::RightBrace => "}",
      TokenKind::Comma => ",",
      TokenKind::Dot => ".",
      TokenKind::Minus => "-",
      TokenKind::Plus => "+",
      TokenKind::Semicolon => ";",
      TokenKind::Slash => "/",
      TokenKind::Star => "*",
      TokenKind::Bang => "!",
      TokenKind::BangEqual => "!=",
      TokenKind::Equal => "=",
      TokenKind::EqualEqual => "==",
      TokenKind::Greater => ">",
      TokenKind::GreaterEqual => ">=",
      TokenKind::Less => "<",
      TokenKind::LessEqual => "<=",
      TokenKind::Identifier => "identifier",
      TokenKind::String => "string",
      TokenKind::Number => "number",
      TokenKind::And => "and",
      TokenKind::Class => "class",
      TokenKind::Else => "else",
      TokenKind::False => "false",
      TokenKind::Fun => "fun",
      TokenKind::For => "for",
      TokenKind::If => "if",
      TokenKind::Nil => "nil",
      TokenKind::Or => "or",
      TokenKind::Print => "print",
      TokenKind::Return => "return",
      TokenKind::Super => "super",
      TokenKind::This => "this",
      TokenKind::True => "true",
      TokenKind::Var => "var",
      TokenKind::While => "while",
      TokenKind::Error => "error",
      TokenKind::Eof => "eof",
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display() {
    let number = Token::new(TokenKind::Number, "1.5", Some(Literal::Number(1.5)), 1, 0, 3);
    assert_eq!(format!("{}", number), "NUMBER 1.5 1.5");

    let whole = Token::new(TokenKind::Number, "1", Some(Literal::Number(1.0)), 1, 0, 1);
    assert_eq!(format!("{}", whole), "NUMBER 1 1.0");

    let string = Token::new(TokenKind::String, "\"hi\"", Some(Literal::String("hi")), 2, 4, 8);
    assert_eq!(format!("{}", string), "STRING \"hi\" hi");

    let plus = Token::new(TokenKind::Plus, "+", None, 1, 3, 4);
    assert_eq!(format!("{}", plus), "PLUS + null");

    let less_equal = Token::new(TokenKind::LessEqual, "<=", None, 1, 0, 2);
    assert_eq!(format!("{}", less_equal), "LESS_EQUAL <= null");

    let eof = Token::new(TokenKind::Eof, "", None, 1, 0, 0);
    assert_eq!(format!("{}", eof), "EOF  null");
  }

  #[test]
  fn span() {
    let token = Token::new(TokenKind::Identifier, "name", None, 3, 10, 14);
    assert_eq!(token.start(), 10);
    assert_eq!(token.end(), 14);
    assert_eq!(token.line(), 3);
  }
}
