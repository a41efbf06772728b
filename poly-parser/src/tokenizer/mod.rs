pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns the raw lexer over the given input.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Tokenizes the whole input, keeping whitespace.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    // `Symbol` matches any single character, so no token is ever an error
    tokenize(input)
        .spanned()
        .filter_map(|(kind, span)| {
            let kind = kind.ok()?;
            Some(Token { lexeme: &input[span.clone()], span, kind })
        })
        .collect()
}

/// Tokenizes the whole input, dropping whitespace.
pub fn tokenize_significant(input: &str) -> Vec<Token> {
    tokenize_complete(input)
        .into_vec()
        .into_iter()
        .filter(|token| !token.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use TokenKind::*;

    /// Returns the kind and lexeme of every token of the input.
    fn lex(input: &str) -> Vec<(TokenKind, &str)> {
        tokenize_complete(input)
            .iter()
            .map(|token| (token.kind, token.lexeme))
            .collect()
    }

    #[test]
    fn monomial() {
        assert_eq!(
            lex("-12a3bc"),
            vec![(Sub, "-"), (Int, "12"), (Name, "a"), (Int, "3"), (Name, "b"), (Name, "c")],
        );
    }

    #[test]
    fn nested_expr() {
        assert_eq!(
            lex("(a+b) * (c-4)"),
            vec![
                (OpenParen, "("), (Name, "a"), (Add, "+"), (Name, "b"), (CloseParen, ")"),
                (Whitespace, " "), (Mul, "*"), (Whitespace, " "),
                (OpenParen, "("), (Name, "c"), (Sub, "-"), (Int, "4"), (CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn bindings() {
        assert_eq!(
            lex("a=5,c=-7"),
            vec![
                (Name, "a"), (Assign, "="), (Int, "5"), (Comma, ","),
                (Name, "c"), (Assign, "="), (Sub, "-"), (Int, "7"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        assert_eq!(lex("2/X"), vec![(Int, "2"), (Symbol, "/"), (Symbol, "X")]);
        assert_eq!(lex("é"), vec![(Symbol, "é")]);
    }

    #[test]
    fn significant_tokens_have_source_spans() {
        let tokens = tokenize_significant("a + 10");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..1, 2..3, 4..6]);
    }
}
