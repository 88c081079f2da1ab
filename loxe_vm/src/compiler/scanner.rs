use std::{iter::Peekable, str::CharIndices};

use codespan_reporting::diagnostic::Diagnostic;

use super::{
  ir::{
    ast::{Span, Spanned},
    token::{Literal, Token, TokenKind},
  },
  syntax_error,
};
use crate::source::LineOffsets;

/// The result of scanning a full source string
pub struct ScanResult<'a, FileId> {
  /// Every valid token in order, always terminated by an eof token
  pub tokens: Vec<Token<'a>>,

  /// Lexical errors found along the way
  pub errors: Vec<Diagnostic<FileId>>,

  /// The line offsets of the scanned source
  pub line_offsets: LineOffsets,
}

/// A scanner for the loxe language. This struct is
/// responsible for taking a source string and tokenizing it
pub struct Scanner<'a> {
  /// The input source string
  source: &'a str,

  /// A peekable char indicies iterator
  char_indices: Peekable<CharIndices<'a>>,

  /// The offsets each line starts at
  line_offsets: Vec<usize>,

  /// The start of the current token
  start: usize,

  /// The offset just past the last consumed char
  current: usize,
}

impl<'a> Scanner<'a> {
  /// Create a new scanner from the provided source string.
  /// The scanner produces a sequence of tokens
  /// by calling the `scan_token` method
  pub fn new(source: &'a str) -> Scanner<'a> {
    assert!(
      source.len() < u32::MAX as usize,
      "Can only read files less than {} bytes",
      u32::MAX
    );

    let mut line_offsets = Vec::with_capacity(source_line_heuristic_guess(source.len()));
    line_offsets.push(0);

    Scanner {
      source,
      char_indices: source.char_indices().peekable(),
      line_offsets,
      start: 0,
      current: 0,
    }
  }

  /// Scan the entire source string. Error tokens are converted into
  /// diagnostics so the returned tokens only hold valid tokens
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::compiler::{Scanner, ir::token::TokenKind};
  ///
  /// let result = Scanner::new("1 + 2").scan_tokens(0);
  /// let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind()).collect();
  ///
  /// assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::Eof]);
  /// assert!(result.errors.is_empty());
  /// ```
  pub fn scan_tokens<FileId: Copy>(mut self, file_id: FileId) -> ScanResult<'a, FileId> {
    let mut tokens = Vec::with_capacity(self.source.len() / 4 + 1);
    let mut errors = vec![];

    loop {
      let token = self.scan_token();

      match token.kind() {
        TokenKind::Error => errors.push(syntax_error(
          file_id,
          token.str(),
          "Error",
          Span::new(token.start(), token.end()),
          token.line(),
        )),
        TokenKind::Eof => {
          tokens.push(token);
          break;
        },
        _ => tokens.push(token),
      }
    }

    ScanResult {
      tokens,
      errors,
      line_offsets: self.line_offsets(),
    }
  }

  /// Scan the next token from the source
  /// string provided.
  pub fn scan_token(&mut self) -> Token<'a> {
    self.skip_white_space();
    self.start = self.current;

    let c = match self.next() {
      Some(c) => c,
      None => return self.make_token(TokenKind::Eof, "", None),
    };

    match c {
      '(' => self.make_token_source(TokenKind::LeftParen),
      ')' => self.make_token_source(TokenKind::RightParen),
      '{' => self.make_token_source(TokenKind::LeftBrace),
      '}' => self.make_token_source(TokenKind::RightBrace),
      ',' => self.make_token_source(TokenKind::Comma),
      '.' => self.make_token_source(TokenKind::Dot),
      '-' => self.make_token_source(TokenKind::Minus),
      '+' => self.make_token_source(TokenKind::Plus),
      ';' => self.make_token_source(TokenKind::Semicolon),
      '/' => self.make_token_source(TokenKind::Slash),
      '*' => self.make_token_source(TokenKind::Star),
      '!' => {
        if self.match_char('=') {
          self.make_token_source(TokenKind::BangEqual)
        } else {
          self.make_token_source(TokenKind::Bang)
        }
      },
      '=' => {
        if self.match_char('=') {
          self.make_token_source(TokenKind::EqualEqual)
        } else {
          self.make_token_source(TokenKind::Equal)
        }
      },
      '<' => {
        if self.match_char('=') {
          self.make_token_source(TokenKind::LessEqual)
        } else {
          self.make_token_source(TokenKind::Less)
        }
      },
      '>' => {
        if self.match_char('=') {
          self.make_token_source(TokenKind::GreaterEqual)
        } else {
          self.make_token_source(TokenKind::Greater)
        }
      },
      '"' => self.string(),
      _ => {
        if is_digit(c) {
          return self.number();
        }

        if is_alpha(c) {
          return self.identifier();
        }

        self.error_token("Unexpected character.")
      },
    }
  }

  /// Retrieve this files line offsets after it has
  /// been scanned
  pub fn line_offsets(mut self) -> LineOffsets {
    while let Some(c) = self.next() {
      if c == '\n' {
        self.new_line();
      }
    }

    self.line_offsets.shrink_to_fit();
    LineOffsets::new(self.line_offsets, self.source.len())
  }

  /// Generate an identifier token
  fn identifier(&mut self) -> Token<'a> {
    while self.next_if(|c| is_alpha(*c) || is_digit(*c)).is_some() {}

    self.make_token_source(self.identifier_type())
  }

  /// Generate a number token
  fn number(&mut self) -> Token<'a> {
    while self.next_if(|c| is_digit(*c)).is_some() {}

    // a fraction needs at least one digit after the dot
    if let Some('.') = self.peek() {
      if self.peek_next().map_or(false, is_digit) {
        self.next();

        while self.next_if(|c| is_digit(*c)).is_some() {}
      }
    }

    let lexeme = self.current_slice();
    match lexeme.parse::<f64>() {
      Ok(num) => self.make_token(TokenKind::Number, lexeme, Some(Literal::Number(num))),
      Err(_) => self.error_token("Invalid number."),
    }
  }

  /// Generate a string token
  fn string(&mut self) -> Token<'a> {
    loop {
      match self.next() {
        Some('"') => break,
        Some('\n') => self.new_line(),
        Some(_) => {},
        None => return self.error_token("Unterminated string."),
      }
    }

    let lexeme = self.current_slice();
    let contents = &lexeme[1..lexeme.len() - 1];

    self.make_token(TokenKind::String, lexeme, Some(Literal::String(contents)))
  }

  /// Advance through whitespace and comments effectively throwing them away
  fn skip_white_space(&mut self) {
    while let Some(c) = self.peek() {
      match c {
        ' ' | '\r' | '\t' => {
          self.next();
        },
        '\n' => {
          self.next();
          self.new_line();
        },
        '/' => {
          if let Some('/') = self.peek_next() {
            while self.next_if(|c| *c != '\n').is_some() {}
          } else {
            return;
          }
        },
        _ => return,
      }
    }
  }

  /// Identify if the current slice is a keyword.
  /// This uses a short of hard coded trie
  fn identifier_type(&self) -> TokenKind {
    let mut chars = self.current_slice().chars();

    match chars.next() {
      Some(c1) => match c1 {
        'a' => self.check_keyword(1, "nd", TokenKind::And),
        'c' => self.check_keyword(1, "lass", TokenKind::Class),
        'e' => self.check_keyword(1, "lse", TokenKind::Else),
        'f' => match chars.next() {
          Some(c2) => match c2 {
            'a' => self.check_keyword(2, "lse", TokenKind::False),
            'o' => self.check_keyword(2, "r", TokenKind::For),
            'u' => self.check_keyword(2, "n", TokenKind::Fun),
            _ => TokenKind::Identifier,
          },
          None => TokenKind::Identifier,
        },
        'i' => self.check_keyword(1, "f", TokenKind::If),
        'n' => self.check_keyword(1, "il", TokenKind::Nil),
        'o' => self.check_keyword(1, "r", TokenKind::Or),
        'p' => self.check_keyword(1, "rint", TokenKind::Print),
        'r' => self.check_keyword(1, "eturn", TokenKind::Return),
        's' => self.check_keyword(1, "uper", TokenKind::Super),
        't' => match chars.next() {
          Some(c2) => match c2 {
            'h' => self.check_keyword(2, "is", TokenKind::This),
            'r' => self.check_keyword(2, "ue", TokenKind::True),
            _ => TokenKind::Identifier,
          },
          None => TokenKind::Identifier,
        },
        'v' => self.check_keyword(1, "ar", TokenKind::Var),
        'w' => self.check_keyword(1, "hile", TokenKind::While),
        _ => TokenKind::Identifier,
      },
      None => TokenKind::Identifier,
    }
  }

  /// Check if the remainder of the current slice matches the rest
  /// of the keyword
  fn check_keyword(&self, start: usize, rest: &str, kind: TokenKind) -> TokenKind {
    // identifiers are ascii so the prefix is exactly `start` bytes
    let start_index = self.start + start;

    if rest == &self.source[start_index..self.current] {
      return kind;
    }

    TokenKind::Identifier
  }

  /// Make a token from the current state of the scanner
  fn make_token_source(&self, kind: TokenKind) -> Token<'a> {
    self.make_token(kind, self.current_slice(), None)
  }

  /// Make a token spanning the current slice
  fn make_token(&self, kind: TokenKind, lexeme: &'a str, literal: Option<Literal<'a>>) -> Token<'a> {
    Token::new(
      kind,
      lexeme,
      literal,
      self.line(),
      self.start as u32,
      self.current as u32,
    )
  }

  /// Make a new error token
  fn error_token(&self, message: &'static str) -> Token<'a> {
    self.make_token(TokenKind::Error, message, None)
  }

  /// Advance the character iterator if condition is met
  fn next_if(&mut self, f: impl FnOnce(&char) -> bool) -> Option<char> {
    self
      .char_indices
      .next_if(|(_, c)| f(c))
      .map(|(index, c)| {
        self.current = index + c.len_utf8();
        c
      })
  }

  /// Get the next character
  fn next(&mut self) -> Option<char> {
    self.char_indices.next().map(|(index, c)| {
      self.current = index + c.len_utf8();
      c
    })
  }

  /// Peek the current character
  fn peek(&mut self) -> Option<char> {
    self.char_indices.peek().map(|(_, c)| *c)
  }

  /// Peek the character after the current character
  fn peek_next(&self) -> Option<char> {
    self.source[self.current..].chars().nth(1)
  }

  /// Insert a new line
  fn new_line(&mut self) {
    self.line_offsets.push(self.current);
  }

  /// The current line, starting at 1
  fn line(&self) -> u32 {
    self.line_offsets.len() as u32
  }

  /// Get the current str slice
  fn current_slice(&self) -> &'a str {
    &self.source[self.start..self.current]
  }

  /// match the current token against an expected
  fn match_char(&mut self, expected: char) -> bool {
    self.next_if(|c| *c == expected).is_some()
  }
}

/// Is the char a digit
fn is_digit(c: char) -> bool {
  c.is_ascii_digit()
}

/// Is the char a valid identifier start
fn is_alpha(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}

/// A loose estimate for how many characters are in a typical line
const fn source_line_heuristic_guess(len: usize) -> usize {
  len / 20 + 1
}

#[cfg(test)]
mod test {
  use super::super::ir::ast::Spanned;
  use super::*;
  use crate::source::LineError;
  use std::collections::HashMap;

  fn token_gen() -> HashMap<TokenKind, &'static str> {
    let mut map = HashMap::new();

    map.insert(TokenKind::LeftParen, "(");
    map.insert(TokenKind::RightParen, ")");
    map.insert(TokenKind::LeftBrace, "{");
    map.insert(TokenKind::RightBrace, "}");
    map.insert(TokenKind::Comma, ",");
    map.insert(TokenKind::Dot, ".");
    map.insert(TokenKind::Minus, "-");
    map.insert(TokenKind::Plus, "+");
    map.insert(TokenKind::Semicolon, ";");
    map.insert(TokenKind::Slash, "/");
    map.insert(TokenKind::Star, "*");
    map.insert(TokenKind::Bang, "!");
    map.insert(TokenKind::BangEqual, "!=");
    map.insert(TokenKind::Equal, "=");
    map.insert(TokenKind::EqualEqual, "==");
    map.insert(TokenKind::Greater, ">");
    map.insert(TokenKind::GreaterEqual, ">=");
    map.insert(TokenKind::Less, "<");
    map.insert(TokenKind::LessEqual, "<=");
    map.insert(TokenKind::Identifier, "_example_ident9");
    map.insert(TokenKind::String, "\"example\"");
    map.insert(TokenKind::Number, "10.5");
    map.insert(TokenKind::And, "and");
    map.insert(TokenKind::Class, "class");
    map.insert(TokenKind::Else, "else");
    map.insert(TokenKind::False, "false");
    map.insert(TokenKind::Fun, "fun");
    map.insert(TokenKind::For, "for");
    map.insert(TokenKind::If, "if");
    map.insert(TokenKind::Nil, "nil");
    map.insert(TokenKind::Or, "or");
    map.insert(TokenKind::Print, "print");
    map.insert(TokenKind::Return, "return");
    map.insert(TokenKind::Super, "super");
    map.insert(TokenKind::This, "this");
    map.insert(TokenKind::True, "true");
    map.insert(TokenKind::Var, "var");
    map.insert(TokenKind::While, "while");
    map.insert(TokenKind::Error, "@");
    map.insert(TokenKind::Eof, "");

    map
  }

  fn kinds(source: &str) -> Vec<TokenKind> {
    Scanner::new(source)
      .scan_tokens(0)
      .tokens
      .iter()
      .map(|token| token.kind())
      .collect()
  }

  #[test]
  fn single_token() {
    let gen = token_gen();
    assert_eq!(gen.len(), TokenKind::VARIANT_COUNT);

    for (token_kind, example) in gen {
      let mut scanner = Scanner::new(example);
      let scanned_token = scanner.scan_token();
      assert_eq!(scanned_token.kind(), token_kind, "scanning {:?}", example);
    }
  }

  #[test]
  fn scan_token() {
    let source = "
    1 + \"something\"
    != nil";

    let mut scanner = Scanner::new(source);
    let mut token = scanner.scan_token();
    assert_eq!(token.start(), 5);
    assert_eq!(token.end(), 6);
    assert_eq!(token.kind(), TokenKind::Number);
    assert_eq!(token.literal(), Some(Literal::Number(1.0)));
    assert_eq!(token.line(), 2);

    token = scanner.scan_token();
    assert_eq!(token.start(), 7);
    assert_eq!(token.end(), 8);
    assert_eq!(token.kind(), TokenKind::Plus);
    assert_eq!(token.str(), "+");

    token = scanner.scan_token();
    assert_eq!(token.start(), 9);
    assert_eq!(token.end(), 20);
    assert_eq!(token.kind(), TokenKind::String);
    assert_eq!(token.str(), "\"something\"");
    assert_eq!(token.literal(), Some(Literal::String("something")));

    token = scanner.scan_token();
    assert_eq!(token.kind(), TokenKind::BangEqual);
    assert_eq!(token.line(), 3);

    token = scanner.scan_token();
    assert_eq!(token.kind(), TokenKind::Nil);

    token = scanner.scan_token();
    assert_eq!(token.kind(), TokenKind::Eof);
    assert_eq!(token.str(), "");
    assert_eq!(token.start() as usize, source.len());
    assert_eq!(token.line(), 3);
  }

  #[test]
  fn multiple_tokens() {
    let result = Scanner::new("1 + 2 * 3").scan_tokens(0);
    assert!(result.errors.is_empty());

    let expected = [
      (TokenKind::Number, "1", Some(Literal::Number(1.0))),
      (TokenKind::Plus, "+", None),
      (TokenKind::Number, "2", Some(Literal::Number(2.0))),
      (TokenKind::Star, "*", None),
      (TokenKind::Number, "3", Some(Literal::Number(3.0))),
      (TokenKind::Eof, "", None),
    ];

    assert_eq!(result.tokens.len(), expected.len());
    for (token, (kind, lexeme, literal)) in result.tokens.iter().zip(expected.iter()) {
      assert_eq!(token.kind(), *kind);
      assert_eq!(token.str(), *lexeme);
      assert_eq!(token.literal(), *literal);
    }
  }

  #[test]
  fn empty_string() {
    let mut scanner = Scanner::new("");

    let token_eof = scanner.scan_token();
    assert_eq!(token_eof.kind(), TokenKind::Eof);
    assert_eq!(token_eof.str(), "");
    assert_eq!(token_eof.line(), 1);
  }

  #[test]
  fn maximal_munch() {
    assert_eq!(
      kinds("!= ! == = <= < >= >"),
      vec![
        TokenKind::BangEqual,
        TokenKind::Bang,
        TokenKind::EqualEqual,
        TokenKind::Equal,
        TokenKind::LessEqual,
        TokenKind::Less,
        TokenKind::GreaterEqual,
        TokenKind::Greater,
        TokenKind::Eof,
      ]
    );
    assert_eq!(
      kinds("===!=="),
      vec![
        TokenKind::EqualEqual,
        TokenKind::Equal,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::Eof,
      ]
    );
    assert_eq!(
      kinds("orchid classy nil_ fun"),
      vec![
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Fun,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn comments() {
    let result = Scanner::new("// leading\n1 / 2 // trailing * +\n/").scan_tokens(0);

    let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(
      kinds,
      vec![
        TokenKind::Number,
        TokenKind::Slash,
        TokenKind::Number,
        TokenKind::Slash,
        TokenKind::Eof
      ]
    );
    assert_eq!(result.tokens[0].line(), 2);
    assert_eq!(result.tokens[3].line(), 3);
  }

  #[test]
  fn numbers() {
    let result = Scanner::new("12 3.25 4. .5 1e3").scan_tokens(0);
    assert!(result.errors.is_empty());

    let tokens: Vec<(TokenKind, &str)> = result
      .tokens
      .iter()
      .map(|t| (t.kind(), t.str()))
      .collect();

    assert_eq!(
      tokens,
      vec![
        (TokenKind::Number, "12"),
        (TokenKind::Number, "3.25"),
        (TokenKind::Number, "4"),
        (TokenKind::Dot, "."),
        (TokenKind::Dot, "."),
        (TokenKind::Number, "5"),
        (TokenKind::Number, "1"),
        (TokenKind::Identifier, "e3"),
        (TokenKind::Eof, ""),
      ]
    );
    assert_eq!(result.tokens[1].literal(), Some(Literal::Number(3.25)));
  }

  #[test]
  fn multiline_string() {
    let result = Scanner::new("\"one\ntwo\" +").scan_tokens(0);
    assert!(result.errors.is_empty());

    let string = result.tokens[0];
    assert_eq!(string.kind(), TokenKind::String);
    assert_eq!(string.literal(), Some(Literal::String("one\ntwo")));
    assert_eq!(string.line(), 2);
    assert_eq!(result.tokens[1].line(), 2);
  }

  #[test]
  fn no_escapes() {
    let mut scanner = Scanner::new("\"a\\nb\"");
    let token = scanner.scan_token();

    assert_eq!(token.kind(), TokenKind::String);
    assert_eq!(token.literal(), Some(Literal::String("a\\nb")));
  }

  #[test]
  fn unterminated_string() {
    let result = Scanner::new("1 + \"abc").scan_tokens(0);

    let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(
      kinds,
      vec![TokenKind::Number, TokenKind::Plus, TokenKind::Eof]
    );

    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.message, "Unterminated string.");
    assert_eq!(error.labels[0].range, 4..8);
    assert_eq!(error.notes, vec!["[line 1] Error: Unterminated string.".to_string()]);
  }

  #[test]
  fn multiple_errors() {
    let result = Scanner::new("@ 1\n# 2").scan_tokens(0);

    let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(
      kinds,
      vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
    );

    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].message, "Unexpected character.");
    assert_eq!(result.errors[0].labels[0].message, "Error");
    assert_eq!(
      result.errors[0].notes,
      vec!["[line 1] Error: Unexpected character.".to_string()]
    );
    assert_eq!(
      result.errors[1].notes,
      vec!["[line 2] Error: Unexpected character.".to_string()]
    );
  }

  #[test]
  fn rescan_lexemes() {
    let source = "(1.5 + \"two\") >= !nil == _x3 or while // done";
    let result = Scanner::new(source).scan_tokens(0);
    assert!(result.errors.is_empty());

    for token in result.tokens.iter().filter(|t| t.kind() != TokenKind::Eof) {
      let mut scanner = Scanner::new(token.str());
      let rescanned = scanner.scan_token();

      assert_eq!(rescanned.kind(), token.kind());
      assert_eq!(rescanned.str(), token.str());
      assert_eq!(rescanned.literal(), token.literal());
      assert_eq!(scanner.scan_token().kind(), TokenKind::Eof);
    }
  }

  #[test]
  fn line_offsets() {
    let source = "
    1 + 2
    == \"something\"
    ";

    let mut scanner = Scanner::new(source);

    scanner.scan_token();
    let offsets = scanner.line_offsets();

    assert_eq!(offsets.lines(), 4);
    assert_eq!(offsets.line_range(0), Ok(0..1));
    assert_eq!(offsets.line_range(1), Ok(1..11));
    assert_eq!(offsets.line_range(2), Ok(11..30));
    assert_eq!(offsets.line_range(3), Ok(30..34));
    assert_eq!(offsets.line_range(4), Err(LineError::LineOutOfBounds));
  }
}
