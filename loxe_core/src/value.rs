use std::fmt;

/// Enum of value types in loxe
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum ValueKind {
  Bool,
  Nil,
  Number,
  String,
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ValueKind::Bool => "bool",
      ValueKind::Nil => "nil",
      ValueKind::Number => "number",
      ValueKind::String => "string",
    })
  }
}

#[macro_export]
macro_rules! val {
  ( $x:expr ) => {
    Value::from($x)
  };
}

pub const VALUE_NIL: Value = Value::Nil;
pub const VALUE_FALSE: Value = Value::Bool(false);
pub const VALUE_TRUE: Value = Value::Bool(true);

/// A dynamically typed loxe value
#[derive(Clone, Debug)]
pub enum Value {
  Bool(bool),
  Nil,
  Number(f64),
  String(String),
}

impl Value {
  /// Is this loxe value nil
  ///
  /// # Examples
  /// ```
  /// use loxe_core::value::Value;
  ///
  /// let val1 = Value::Nil;
  /// assert_eq!(val1.is_nil(), true);
  /// ```
  #[inline]
  pub fn is_nil(&self) -> bool {
    matches!(self, Value::Nil)
  }

  #[inline]
  pub fn is_bool(&self) -> bool {
    matches!(self, Value::Bool(_))
  }

  #[inline]
  pub fn is_num(&self) -> bool {
    matches!(self, Value::Number(_))
  }

  #[inline]
  pub fn is_str(&self) -> bool {
    matches!(self, Value::String(_))
  }

  /// Is this value falsey. Only `nil` and `false` are falsey,
  /// every other value including `0` and `""` is truthy
  ///
  /// # Examples
  /// ```
  /// use loxe_core::value::Value;
  ///
  /// assert_eq!(Value::Nil.is_falsey(), true);
  /// assert_eq!(Value::Bool(false).is_falsey(), true);
  /// assert_eq!(Value::Number(0.0).is_falsey(), false);
  /// assert_eq!(Value::String("".to_string()).is_falsey(), false);
  /// ```
  #[inline]
  pub fn is_falsey(&self) -> bool {
    match self {
      Value::Bool(b) => !b,
      Value::Nil => true,
      _ => false,
    }
  }

  #[inline]
  pub fn is_truthy(&self) -> bool {
    !self.is_falsey()
  }

  /// Unwrap this value as a number if it is one
  #[inline]
  pub fn to_num(&self) -> Option<f64> {
    match self {
      Value::Number(num) => Some(*num),
      _ => None,
    }
  }

  /// Unwrap this value as a str if it is one
  #[inline]
  pub fn to_str(&self) -> Option<&str> {
    match self {
      Value::String(string) => Some(string),
      _ => None,
    }
  }

  /// Get the variant kind of this value
  ///
  /// # Examples
  /// ```
  /// use loxe_core::value::{Value, ValueKind};
  ///
  /// assert_eq!(Value::Number(10.0).kind(), ValueKind::Number);
  /// assert_eq!(Value::Nil.kind(), ValueKind::Nil);
  /// ```
  pub fn kind(&self) -> ValueKind {
    match self {
      Value::Bool(_) => ValueKind::Bool,
      Value::Nil => ValueKind::Nil,
      Value::Number(_) => ValueKind::Number,
      Value::String(_) => ValueKind::String,
    }
  }
}

/// Render a number in its canonical loxe text form. Magnitudes
/// in `[1e-3, 1e7)` use plain decimal notation, anything else uses a
/// mantissa and an `E` exponent. Either form keeps at least one digit
/// after the point.
///
/// # Examples
/// ```
/// use loxe_core::value::number_text;
///
/// assert_eq!(number_text(1.0), "1.0");
/// assert_eq!(number_text(0.5), "0.5");
/// assert_eq!(number_text(10000000.0), "1.0E7");
/// assert_eq!(number_text(0.0001), "1.0E-4");
/// ```
pub fn number_text(num: f64) -> String {
  if num.is_nan() {
    return "NaN".to_string();
  }

  if num.is_infinite() {
    return if num.is_sign_positive() {
      "Infinity".to_string()
    } else {
      "-Infinity".to_string()
    };
  }

  let magnitude = num.abs();
  if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
    let text = num.to_string();
    return if text.contains('.') {
      text
    } else {
      format!("{}.0", text)
    };
  }

  let text = format!("{:e}", num);
  match text.split_once('e') {
    Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
    Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
    None => text,
  }
}

impl Default for Value {
  fn default() -> Self {
    VALUE_NIL
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<f64> for Value {
  fn from(num: f64) -> Self {
    Value::Number(num)
  }
}

impl From<String> for Value {
  fn from(string: String) -> Self {
    Value::String(string)
  }
}

impl From<&str> for Value {
  fn from(string: &str) -> Self {
    Value::String(string.to_string())
  }
}

impl fmt::Display for Value {
  /// Implement display for value in loxe. Numbers use `number_text`
  /// with a trailing `.0` removed
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(num) => {
        let text = number_text(*num);
        f.write_str(text.strip_suffix(".0").unwrap_or(&text))
      },
      Self::Bool(b) => write!(f, "{}", b),
      Self::Nil => write!(f, "nil"),
      Self::String(string) => write!(f, "{}", string),
    }
  }
}

impl PartialEq for Value {
  /// Determine if this `Value` and another `Value` are equal inside
  /// of the loxe runtime. Values of different kinds are never equal.
  /// Numbers compare by their bits so `NaN` equals any `NaN` and `0`
  /// differs from `-0`
  ///
  /// # Examples
  /// ```
  /// use loxe_core::value::Value;
  ///
  /// let val1 = Value::Bool(false);
  /// let val2 = Value::Bool(true);
  /// let val3 = Value::Nil;
  ///
  /// assert_eq!(val1 == val1, true);
  /// assert_eq!(val1 == val2, false);
  /// assert_eq!(val1 == val3, false);
  /// assert_eq!(val3 == Value::Nil, true);
  /// assert_eq!(Value::Number(f64::NAN) == Value::Number(f64::NAN), true);
  /// assert_eq!(Value::Number(0.0) == Value::Number(-0.0), false);
  /// ```
  fn eq(&self, other: &Value) -> bool {
    match (self, other) {
      (Self::Number(a), Self::Number(b)) => {
        a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
      },
      (Self::String(a), Self::String(b)) => a == b,
      (Self::Bool(a), Self::Bool(b)) => a == b,
      (Self::Nil, Self::Nil) => true,
      _ => false,
    }
  }
}
