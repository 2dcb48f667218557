use std::iter::Peekable;
use std::str::Chars;
use crate::error::Error;
use crate::grammar::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme {
  Sym(Symbol),
  Colon,
}

/// Scans one production such as `E:E+T`. Runs of uppercase letters are
/// nonterminals, runs of lowercase letters are terminals, and any other
/// non-blank character is a terminal of its own.
pub fn scan(source: &str) -> Result<Production, Error> {
  let lexemes = lex(source);

  let invalid = || Error::InvalidProduction {
    source: source.to_owned(),
  };

  match lexemes.as_slice() {
    [Lexeme::Sym(left), Lexeme::Colon, body @ ..] if left.is_nonterm() => {
      let body = body.iter()
        .map(|lexeme| match lexeme {
          Lexeme::Sym(sym) => Some(sym.clone()),
          Lexeme::Colon => None,
        })
        .collect::<Option<Vec<_>>>()
        .filter(|body| !body.is_empty())
        .ok_or_else(invalid)?;
      Production::new(left.clone(), body)
    }
    _ => Err(invalid()),
  }
}

/// Scans productions in order. The first one fixes the start symbol.
pub fn scan_grammar<I>(lines: I) -> Result<Grammar, Error>
where
  I: IntoIterator,
  I::Item: AsRef<str>,
{
  let mut grammar = Grammar::new();
  for line in lines {
    grammar.add_production(scan(line.as_ref())?);
  }

  if grammar.productions().is_empty() {
    return Err(Error::EmptyGrammar);
  }
  Ok(grammar)
}

fn lex(source: &str) -> Vec<Lexeme> {
  let mut chars = source.chars().peekable();
  let mut lexemes = vec![];

  while let Some(&c) = chars.peek() {
    if c.is_ascii_uppercase() {
      let name = take_run(&mut chars, |c| c.is_ascii_uppercase());
      lexemes.push(Lexeme::Sym(nonterm(name)));
    } else if c.is_ascii_lowercase() {
      let name = take_run(&mut chars, |c| c.is_ascii_lowercase());
      lexemes.push(Lexeme::Sym(term(name)));
    } else {
      chars.next();
      if c == ':' {
        lexemes.push(Lexeme::Colon);
      } else if !c.is_whitespace() {
        lexemes.push(Lexeme::Sym(term(c.to_string())));
      }
    }
  }

  lexemes
}

fn take_run(chars: &mut Peekable<Chars>, pred: impl Fn(char) -> bool) -> String {
  let mut run = String::new();
  while let Some(&c) = chars.peek() {
    if !pred(c) {
      break;
    }
    run.push(c);
    chars.next();
  }
  run
}
