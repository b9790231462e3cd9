//! Lexer for ES module source, built on logos.
//!
//! Only the parts of the language needed to find module boundaries are
//! distinguished: reserved words that start declarations, string literals,
//! identifiers and the punctuation that delimits groups and lists. Everything
//! else collapses into `Number`, `Template`, `Regex` or `Punct`.
//!
//! A `/` starts a regular expression literal unless the previous token ends
//! an operand, in which case it is division. [`tokenize`] records that state
//! in the lexer extras after every token.

use std::fmt;
use std::ops::Range;

use logos::Logos;

/// A lexical token.
///
/// Contextual words (`from`, `as`, `async`) are plain identifiers and are
/// matched by value in the parser.
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(extras = LexState)]
#[logos(skip(r"(?:[\t\x0B\x0C \p{Zs}\x{FEFF}\r\n\x{2028}\x{2029}]+|//[^\n]*|/\*(?:[^*]|\*+[^*/])*\*+/)", allow_greedy = true))]
pub enum Token {
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("default")]
    Default,
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("function")]
    Function,
    #[token("class")]
    Class,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("=")]
    Eq,
    #[token("*")]
    Star,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    /// Single- or double-quoted string, quotes removed.
    #[regex(r#""(?:[^"\\\n]|\\(?:\r\n|.|\n))*""#, unquote)]
    #[regex(r"'(?:[^'\\\n]|\\(?:\r\n|.|\n))*'", unquote)]
    Str(String),

    /// Template literal without nested templates in substitutions.
    #[regex(r"`(?:[^`\\]|\\(?:.|\n))*`")]
    Template,

    /// Regular expression literal, flags included. A lone `/` in operator
    /// position comes back as `Punct('/')`.
    #[token("/", slash)]
    Regex,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Any other operator character.
    #[regex(r"[!%&+\-<>?@^|~#\\]", |lex| lex.slice().chars().next())]
    Punct(char),
}

/// Lexer state carried between tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexState {
    /// The previous token ends an operand, so `/` divides.
    pub after_operand: bool,
}

impl Token {
    /// Whether a `/` following this token is division.
    fn ends_operand(&self) -> bool {
        match self {
            Token::Ident(word) => !matches!(
                word.as_str(),
                "return"
                    | "typeof"
                    | "instanceof"
                    | "in"
                    | "of"
                    | "new"
                    | "delete"
                    | "void"
                    | "throw"
                    | "case"
                    | "do"
                    | "else"
                    | "yield"
                    | "await"
            ),
            Token::Str(_)
            | Token::Template
            | Token::Number
            | Token::Regex
            | Token::RParen
            | Token::RBracket => true,
            _ => false,
        }
    }
}

/// Decide between division and a regular expression literal at a `/`.
fn slash(lex: &mut logos::Lexer<Token>) -> Token {
    if lex.extras.after_operand {
        return Token::Punct('/');
    }
    match regex_body_len(lex.remainder()) {
        Some(len) => {
            lex.bump(len);
            Token::Regex
        }
        None => Token::Punct('/'),
    }
}

/// Length of a regular expression literal after its opening `/`, flags
/// included. `None` when the line ends before the closing `/`.
fn regex_body_len(rest: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = rest.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
            '\\' => match chars.next() {
                Some((_, '\n' | '\r' | '\u{2028}' | '\u{2029}')) | None => return None,
                Some(_) => {}
            },
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let body = i + 1;
                let flags = rest[body..]
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                    .unwrap_or(rest.len() - body);
                return Some(body + flags);
            }
            _ => {}
        }
    }
    None
}

/// Strip the surrounding quotes and resolve simple escapes.
fn unquote(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            // Line continuation.
            Some('\n') | Some('\u{2028}') | Some('\u{2029}') => {}
            Some('\r') => {
                if chars.as_str().starts_with('\n') {
                    chars.next();
                }
            }
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Import => write!(f, "import"),
            Token::Export => write!(f, "export"),
            Token::Default => write!(f, "default"),
            Token::Var => write!(f, "var"),
            Token::Let => write!(f, "let"),
            Token::Const => write!(f, "const"),
            Token::Function => write!(f, "function"),
            Token::Class => write!(f, "class"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Eq => write!(f, "="),
            Token::Star => write!(f, "*"),
            Token::Comma => write!(f, ","),
            Token::Semi => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Dot => write!(f, "."),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::Template => write!(f, "template literal"),
            Token::Regex => write!(f, "regular expression"),
            Token::Number => write!(f, "number"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Punct(c) => write!(f, "{c}"),
        }
    }
}

/// A token with its byte range in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

/// Text the lexer could not match.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: Range<usize>,
    pub text: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected {:?} at {}..{}", self.text, self.span.start, self.span.end)
    }
}

/// Tokenize a whole source file, collecting every unmatched span.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => {
                lexer.extras.after_operand = token.ends_operand();
                tokens.push(Spanned {
                    token,
                    span: lexer.span(),
                });
            }
            Err(()) => errors.push(LexError {
                span: lexer.span(),
                text: lexer.slice().to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source)
            .expect("lexes")
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn import_statement() {
        assert_eq!(
            lex(r#"import { a as b } from "./mod";"#),
            vec![
                Token::Import,
                Token::LBrace,
                Token::Ident("a".into()),
                Token::Ident("as".into()),
                Token::Ident("b".into()),
                Token::RBrace,
                Token::Ident("from".into()),
                Token::Str("./mod".into()),
                Token::Semi,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = lex("// export nothing\n/* import\n * x */ export default 1");
        assert_eq!(tokens, vec![Token::Export, Token::Default, Token::Number]);
    }

    #[test]
    fn single_quoted_strings_unescape() {
        assert_eq!(lex(r"'it\'s'"), vec![Token::Str("it's".into())]);
    }

    #[test]
    fn keywords_need_word_boundary() {
        assert_eq!(
            lex("imports exported $default"),
            vec![
                Token::Ident("imports".into()),
                Token::Ident("exported".into()),
                Token::Ident("$default".into()),
            ]
        );
    }

    #[test]
    fn template_literal_is_one_token() {
        assert_eq!(lex("`a ${b} import c`"), vec![Token::Template]);
    }

    #[test]
    fn regex_literal_after_operator() {
        assert_eq!(
            lex(r"s.replace(/https?:\/\//, '')"),
            vec![
                Token::Ident("s".into()),
                Token::Dot,
                Token::Ident("replace".into()),
                Token::LParen,
                Token::Regex,
                Token::Comma,
                Token::Str(String::new()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn regex_literal_with_quote_and_class() {
        assert_eq!(
            lex(r"x = /'[/\]]\(/gi;"),
            vec![
                Token::Ident("x".into()),
                Token::Eq,
                Token::Regex,
                Token::Semi,
            ]
        );
    }

    #[test]
    fn slash_after_operand_divides() {
        assert_eq!(
            lex("a / b / c"),
            vec![
                Token::Ident("a".into()),
                Token::Punct('/'),
                Token::Ident("b".into()),
                Token::Punct('/'),
                Token::Ident("c".into()),
            ]
        );
        assert_eq!(
            lex("(a) / 2"),
            vec![
                Token::LParen,
                Token::Ident("a".into()),
                Token::RParen,
                Token::Punct('/'),
                Token::Number,
            ]
        );
    }

    #[test]
    fn regex_after_keyword_word() {
        assert_eq!(lex("return /x/.test(y)")[1], Token::Regex);
    }

    #[test]
    fn unicode_whitespace_is_skipped() {
        assert_eq!(
            lex("\u{FEFF}export\u{A0}default\u{2028}1"),
            vec![Token::Export, Token::Default, Token::Number]
        );
    }

    #[test]
    fn string_line_continuation() {
        assert_eq!(lex("'a\\\nb'"), vec![Token::Str("ab".into())]);
        assert_eq!(lex("\"a\\\r\nb\""), vec![Token::Str("ab".into())]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(tokenize("import x from \"oops").is_err());
    }
}
