//! Splits one parameter-table line into fields.
//
//  Lexical items (informal):
//
//      Word   ::= [A-Za-z0-9_"+./-]+
//      Pair   ::= '(' [A-Za-z0-9_+./-]+ ws* ',' ws* [A-Za-z0-9_+.-]+ ')'
//
//  Anything else (whitespace, stray punctuation) separates fields and is
//  dropped. A '(' that does not start a well-formed pair is dropped too and
//  lexing resumes right after it.

use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Clone)]
pub struct Fields<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '"' | '+' | '.' | '/' | '-')
}

// no quotes inside a pair
fn is_pair_head_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '.' | '/' | '-')
}

// no quotes or slashes after the comma
fn is_pair_tail_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '.' | '-')
}

impl<'a> Fields<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.src.len())
    }

    fn skip_while<F: Fn(char) -> bool>(&mut self, pred: F) {
        while let Some(&(_, c)) = self.chars.peek() {
            if pred(c) {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_word<F: Fn(char) -> bool>(&mut self, pred: F) -> Option<&'a str> {
        let start = self.offset();
        self.skip_while(pred);
        let end = self.offset();
        let src = self.src;
        (end > start).then(|| &src[start..end])
    }

    fn expect(&mut self, want: char) -> Option<()> {
        match self.chars.next() {
            Some((_, c)) if c == want => Some(()),
            _ => None,
        }
    }

    /// Try to read `(a, b)` starting at an already consumed '(' at `start`.
    fn read_pair(&mut self, start: usize) -> Option<&'a str> {
        self.read_word(is_pair_head_char)?;
        self.skip_while(char::is_whitespace);
        self.expect(',')?;
        self.skip_while(char::is_whitespace);
        self.read_word(is_pair_tail_char)?;
        self.expect(')')?;
        let end = self.offset();
        let src = self.src;
        Some(&src[start..end])
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &(i, c) = self.chars.peek()?;

            if is_word_char(c) {
                return self.read_word(is_word_char);
            }

            self.chars.next();
            if c == '(' {
                let mut attempt = self.clone();
                if let Some(pair) = attempt.read_pair(i) {
                    *self = attempt;
                    return Some(pair);
                }
            }
        }
    }
}
