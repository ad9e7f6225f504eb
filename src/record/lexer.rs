use logos::{Logos, SpannedIter};

pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) span: logos::Span,
}

pub(super) struct TokenIter<'a> {
    iter: SpannedIter<'a, TokenKind>,
}

impl<'a> TokenIter<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            iter: TokenKind::lexer(input).spanned(),
        }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, span) = self.iter.next()?;
        // Every character is covered by one of the patterns, anything the
        // lexer still rejects is plain text as far as records are concerned.
        let kind = kind.unwrap_or(TokenKind::Text);
        Some(Token { kind, span })
    }
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TokenKind {
    #[token(";")]
    RecordEnd,
    #[regex(r"\r\n|[\r\n\t]")]
    Break,
    #[regex(r"[^;\r\n\t]+")]
    Text,
}
