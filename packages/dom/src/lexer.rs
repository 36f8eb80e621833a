//! Lexer for markup fragments using logos
//!
//! Tokenizes at tag granularity: attribute parsing inside a tag happens
//! later, in the parser. There is no error path — input the lexer cannot
//! classify is folded back into text, matching browser behavior for
//! stray `<` characters.

use logos::Logos;

/// Token types for a markup fragment
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    #[regex(r"<!--([^-]|-[^-]|--[^>])*-->", |lex| lex.slice())]
    Comment(&'src str),

    // Doctype and processing instructions are dropped by the parser.
    // The doctype pattern requires a letter after "<!" so it never
    // competes with the comment pattern.
    #[regex(r"<![a-zA-Z][^>]*>")]
    #[regex(r"<\?[^>]*>")]
    Directive,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*\s*>", |lex| lex.slice())]
    ClosingTag(&'src str),

    // Open tags, including self-closing and void forms. Quoted
    // attribute sections are matched as units so a raw '>' inside a
    // value does not end the tag early.
    #[regex(r#"<[a-zA-Z]([^>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice())]
    Tag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

/// Lex a fragment into tokens.
///
/// Total: lexer errors (a `<` that starts no tag) are re-emitted as text.
pub fn lex(source: &str) -> Vec<Token<'_>> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| result.unwrap_or(Token::Text(&source[span])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_tags_and_text() {
        let tokens = lex("<p class=\"intro\">Hello</p>");

        assert_eq!(
            tokens,
            vec![
                Token::Tag("<p class=\"intro\">"),
                Token::Text("Hello"),
                Token::ClosingTag("</p>"),
            ]
        );
    }

    #[test]
    fn test_lex_comment() {
        let tokens = lex("<!-- note -->");
        assert_eq!(tokens, vec![Token::Comment("<!-- note -->")]);
    }

    #[test]
    fn test_lex_stray_angle_is_text() {
        let tokens = lex("2 < 3");
        assert_eq!(tokens, vec![Token::Text("2 "), Token::Text("<"), Token::Text(" 3")]);
    }

    #[test]
    fn test_lex_angle_inside_quoted_attribute() {
        let tokens = lex("<a title=\"a>b\">x</a>");
        assert_eq!(
            tokens,
            vec![
                Token::Tag("<a title=\"a>b\">"),
                Token::Text("x"),
                Token::ClosingTag("</a>"),
            ]
        );
    }

    #[test]
    fn test_lex_self_closing() {
        let tokens = lex("<img src=\"a.png\" />");
        assert_eq!(tokens, vec![Token::Tag("<img src=\"a.png\" />")]);
    }
}
