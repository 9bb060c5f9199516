//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer is intentionally tiny – it recognises exactly three
//! things: runs of decimal digits, the additive operators `+` and `-`, and
//! ASCII whitespace (which is dropped). Anything else aborts the scan on
//! the spot; there is no resynchronisation.

use crate::error::{CompileError, CompileResult};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Punctuator,
  Num,
  Eof,
}

/// Thin wrapper for lexical information needed by later stages.
///
/// A token does not own its text; it records the byte span it was cut
/// from, and [`token_text`] recovers the exact substring on demand.
#[derive(Debug, Clone)]
pub struct Token {
  pub kind: TokenKind,
  pub value: Option<i64>,
  pub loc: usize,
  pub len: usize,
}

impl Token {
  /// Convenience constructor to keep the `tokenize` loop readable.
  pub fn new(kind: TokenKind, loc: usize, len: usize, value: Option<i64>) -> Self {
    Self {
      kind,
      value,
      loc,
      len,
    }
  }
}

/// Lex the input into a flat vector of tokens terminated by an `Eof` marker.
///
/// A digit run becomes a single `Num` token carrying its parsed value; the
/// scan jumps past the whole run in one step. A `-` in front of a digit run
/// is never folded into the number – signs are always their own
/// `Punctuator` tokens, so numeric values are non-negative by construction.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let bytes = input.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];
    if c.is_ascii_whitespace() {
      i += 1;
      continue;
    }

    if c.is_ascii_digit() {
      let start = i;
      i += 1;
      while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
      }
      let text = &input[start..i];
      let value = text
        .parse::<i64>()
        .map_err(|err| CompileError::lex_at(input, start, format!("invalid number: {err}")))?;
      tokens.push(Token::new(TokenKind::Num, start, i - start, Some(value)));
      continue;
    }

    if c == b'+' || c == b'-' {
      tokens.push(Token::new(TokenKind::Punctuator, i, 1, None));
      i += 1;
      continue;
    }

    let invalid_char = input[i..].chars().next().unwrap_or('\0');
    let message = if invalid_char.is_ascii_alphabetic() {
      "expect a number".to_string()
    } else {
      format!("invalid token: '{invalid_char}'")
    };
    return Err(CompileError::lex_at(input, i, message));
  }

  tokens.push(Token::new(TokenKind::Eof, input.len(), 0, None));
  Ok(tokens)
}

/// Return the slice from the source that produced this token.
pub fn token_text<'a>(token: &Token, source: &'a str) -> &'a str {
  let end = token.loc + token.len;
  &source[token.loc..end]
}

/// Human-friendly description used in diagnostics.
pub fn describe_token(token: Option<&Token>, source: &str) -> String {
  match token {
    Some(t) => match t.kind {
      TokenKind::Eof => "EOF".to_string(),
      _ => token_text(t, source).to_string(),
    },
    None => "EOF".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn should_lex_digit_run_as_single_token() {
    let tokens = tokenize("1234").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Num);
    assert_eq!(tokens[0].value, Some(1234));
    assert_eq!((tokens[0].loc, tokens[0].len), (0, 4));
    assert_eq!(tokens[1].kind, TokenKind::Eof);
  }

  #[test]
  fn should_lex_operators_as_punctuators() {
    let tokens = tokenize("5+20-4").unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
      kinds,
      vec![
        TokenKind::Num,
        TokenKind::Punctuator,
        TokenKind::Num,
        TokenKind::Punctuator,
        TokenKind::Num,
        TokenKind::Eof,
      ]
    );
    assert_eq!(token_text(&tokens[1], "5+20-4"), "+");
    assert_eq!(token_text(&tokens[3], "5+20-4"), "-");
  }

  #[test]
  fn should_skip_whitespace_without_producing_tokens() {
    let spaced = tokenize(" 12 + 34 - 5 ").unwrap();
    let dense = tokenize("12+34-5").unwrap();

    let values =
      |tokens: &[Token]| -> Vec<Option<i64>> { tokens.iter().map(|token| token.value).collect() };
    assert_eq!(spaced.len(), dense.len());
    assert_eq!(values(&spaced), values(&dense));
  }

  #[test]
  fn should_terminate_empty_input_with_eof() {
    let tokens = tokenize("").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].loc, 0);
  }

  #[test]
  fn should_keep_sign_separate_from_number() {
    let tokens = tokenize("-7").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Punctuator);
    assert_eq!(tokens[1].kind, TokenKind::Num);
    assert_eq!(tokens[1].value, Some(7));
  }

  #[test]
  fn should_reject_unsupported_punctuation() {
    let err = tokenize("1*2").unwrap_err();

    assert!(matches!(err, CompileError::Lex { .. }));
    assert!(err.to_string().contains("invalid token: '*'"));
  }

  #[test]
  fn should_reject_alphabetic_input() {
    let err = tokenize("abc").unwrap_err();

    assert!(matches!(err, CompileError::Lex { .. }));
    assert!(err.to_string().contains("expect a number"));
  }

  #[test]
  fn should_reject_overflowing_number() {
    let err = tokenize("99999999999999999999").unwrap_err();

    assert!(matches!(err, CompileError::Lex { .. }));
    assert!(err.to_string().contains("invalid number"));
  }
}
