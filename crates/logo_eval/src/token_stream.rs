//! `TokenStream`: a `VecDeque`-backed cursor exposing `popleft`,
//! `appendleft`, `peek`, and `len`. The evaluator consumes tokens
//! from the front and occasionally pushes one back (the negative-prefix
//! rewrite in `evaluate_value`), which is exactly what a plain `Vec`-based
//! cursor like `logo_parse::Cursor` can't do without re-copying.

use std::collections::VecDeque;

use logo_ir::Token;

#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens: tokens.into(),
        }
    }

    pub fn popleft(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    pub fn appendleft(&mut self, token: Token) {
        self.tokens.push_front(token);
    }

    pub fn append(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Token> {
        self.tokens.into()
    }
}
