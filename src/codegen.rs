//! Code generation: drive the token stream through the additive grammar and
//! lower it into AT&T x86-64 assembly.
//!
//! There is no AST. The grammar `expr := number (("+" | "-") number)*` is
//! flat enough that the emitter consumes tokens left to right and prints
//! one instruction per token it accepts, keeping the running result in
//! `%rax` so the generated `main` returns it directly.

use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Token, TokenKind, describe_token, token_text};

/// Emit a complete program for the token stream.
///
/// The first number lands in `%rax`; every following operator/number pair
/// folds into it in source order, so the generated program computes the
/// strict left-to-right evaluation of the expression.
pub fn generate(tokens: Vec<Token>, source: &str) -> CompileResult<String> {
  let mut stream = TokenStream::new(tokens, source);

  if stream.is_eof() {
    return Err(CompileError::syntax_at(source, 0, "expression is empty"));
  }

  let mut asm = String::new();
  asm.push_str(".text\n");
  asm.push_str(".global main\n");
  asm.push_str("main:\n");

  let first = stream.get_number()?;
  asm.push_str(&format!("    mov ${first}, %rax\n"));

  while !stream.is_eof() {
    if stream.equal("+") {
      let value = stream.get_number()?;
      asm.push_str(&format!("    add ${value}, %rax\n"));
      continue;
    }

    // "+" already failed to match, so "-" is the only legal token here.
    stream.skip("-")?;
    let value = stream.get_number()?;
    asm.push_str(&format!("    sub ${value}, %rax\n"));
  }

  asm.push_str("    ret\n");
  Ok(asm)
}

/// Lightweight cursor over the token vector.
///
/// Exactly one of these exists per compilation run. It only ever moves
/// forward, and once it rests on the `Eof` terminator every `skip`/
/// `get_number` call keeps failing instead of reading past the end.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
}

impl<'a> TokenStream<'a> {
  /// Take ownership of the token stream; the emitter advances `pos` as it consumes input.
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  /// Consume the current token if it matches the provided punctuator.
  fn equal(&mut self, op: &str) -> bool {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Punctuator
      && token.len == op.len()
      && token_text(token, self.source) == op
    {
      self.pos += 1;
      return true;
    }
    false
  }

  /// Like `equal`, but a mismatch is fatal: the grammar leaves no alternative.
  fn skip(&mut self, s: &str) -> CompileResult<()> {
    if self.equal(s) {
      Ok(())
    } else {
      let (loc, got) = match self.tokens.get(self.pos) {
        Some(token) => (token.loc, describe_token(Some(token), self.source)),
        None => (self.source.len(), "EOF".to_string()),
      };
      Err(CompileError::syntax_at(
        self.source,
        loc,
        format!("expected \"{s}\", but got \"{got}\""),
      ))
    }
  }

  /// Consume the current token as an integer literal and return its value.
  fn get_number(&mut self) -> CompileResult<i64> {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Num
    {
      let value = token.value.ok_or_else(|| {
        CompileError::syntax_at(
          self.source,
          token.loc,
          "internal error: numeric token missing value",
        )
      })?;
      self.pos += 1;
      return Ok(value);
    }

    let (loc, got) = match self.tokens.get(self.pos) {
      Some(token) => (token.loc, describe_token(Some(token), self.source)),
      None => (self.source.len(), "EOF".to_string()),
    };
    Err(CompileError::syntax_at(
      self.source,
      loc,
      format!("expected a number, but got \"{got}\""),
    ))
  }

  fn is_eof(&self) -> bool {
    matches!(self.peek().map(|token| token.kind), Some(TokenKind::Eof))
  }
}
