//! Parser for ES module outlines.
//!
//! Transforms a token stream from the lexer into a [`Module`].
//! Uses chumsky for parser combinators.
//!
//! Import and export declarations are parsed in full. Every other top-level
//! statement is skipped as a run of tokens and balanced `{}`/`()`/`[]`
//! groups, so the grammar never needs to understand expressions.

use crate::ast::{ExportDecl, ExportSpecifier, ImportDecl, ImportSpecifier, Item, Module};
use crate::lexer::{self, Token};
use chumsky::{input::ValueInput, prelude::*};

/// Span type used throughout the parser.
pub type Span = SimpleSpan;

type Extra<'tokens> = extra::Err<Rich<'tokens, Token, Span>>;

/// Parse error with location and context.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

/// Parse module source code into its outline.
pub fn parse(source: &str) -> Result<Module, Vec<ParseError>> {
    // Tokenize with logos
    let tokens = lexer::tokenize(source).map_err(|errs| {
        errs.into_iter()
            .map(|e| ParseError {
                span: (e.span.start..e.span.end).into(),
                message: format!("lexer error: unexpected {:?}", e.text),
            })
            .collect::<Vec<_>>()
    })?;

    let tokens: Vec<(Token, Span)> = tokens
        .into_iter()
        .map(|spanned| (spanned.token, (spanned.span.start..spanned.span.end).into()))
        .collect();

    // End-of-input span
    let end_span: Span = (source.len()..source.len()).into();

    let parser = module_parser();
    let result = parser.parse(tokens.as_slice().map(end_span, |(t, s)| (t, s)));

    result.into_result().map_err(|errs| {
        errs.into_iter()
            .map(|e| ParseError {
                span: *e.span(),
                message: e.to_string(),
            })
            .collect()
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Parser Combinators - generic over input type
// ═══════════════════════════════════════════════════════════════════════════

/// Top-level module parser. Adjacent skipped statements collapse into one
/// [`Item::Other`].
fn module_parser<'tokens, I>() -> impl Parser<'tokens, I, Module, Extra<'tokens>>
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    item_parser()
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|mut items| {
            items.dedup_by(|a, b| matches!((a, b), (Item::Other, Item::Other)));
            Module { items }
        })
}

/// Item parser - dispatches on the leading token.
fn item_parser<'tokens, I>() -> impl Parser<'tokens, I, Item, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    choice((
        dynamic_import_parser().to(Item::Other),
        import_parser().map(Item::Import),
        export_parser().map(Item::Export),
        chunk_parser().to(Item::Other),
    ))
    .boxed()
}

/// `import(...)` and `import.meta`: only the keyword is consumed, the rest
/// is ordinary code.
fn dynamic_import_parser<'tokens, I>() -> impl Parser<'tokens, I, (), Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    just(Token::Import)
        .then_ignore(one_of([Token::LParen, Token::Dot]).rewind())
        .ignored()
        .boxed()
}

/// Import: `import "m"`, `import d from "m"`, `import * as ns from "m"`,
/// `import { a, b as c } from "m"`, `import d, { a } from "m"`
fn import_parser<'tokens, I>() -> impl Parser<'tokens, I, ImportDecl, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let bare = string_parser().map(|source| ImportDecl {
        source,
        specifiers: Vec::new(),
    });

    let clause = import_clause_parser()
        .then_ignore(keyword("from"))
        .then(string_parser())
        .map(|(specifiers, source)| ImportDecl { source, specifiers });

    just(Token::Import)
        .ignore_then(choice((bare, clause)))
        .then_ignore(just(Token::Semi).or_not())
        .labelled("import declaration")
        .boxed()
}

/// The bindings between `import` and `from`.
fn import_clause_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Vec<ImportSpecifier>, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let namespace = just(Token::Star)
        .ignore_then(keyword("as"))
        .ignore_then(ident_parser())
        .map(|local| vec![ImportSpecifier::Namespace { local }]);

    let named = export_name_parser()
        .then(keyword("as").ignore_then(ident_parser()).or_not())
        .map(|(imported, local)| ImportSpecifier::Named {
            local: local.unwrap_or_else(|| imported.clone()),
            imported,
        })
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace));

    let default_binding = ident_parser()
        .then(
            just(Token::Comma)
                .ignore_then(choice((namespace.clone(), named.clone())))
                .or_not(),
        )
        .map(|(local, rest)| {
            let mut specifiers = vec![ImportSpecifier::Default { local }];
            specifiers.extend(rest.unwrap_or_default());
            specifiers
        });

    choice((default_binding, namespace, named))
        .labelled("import clause")
        .boxed()
}

/// Export: every `export` form, classified into an [`ExportDecl`].
fn export_parser<'tokens, I>() -> impl Parser<'tokens, I, ExportDecl, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let default = just(Token::Default)
        .ignore_then(chunk_parser().repeated().at_least(1))
        .to(ExportDecl::Default);

    let star = just(Token::Star)
        .ignore_then(keyword("as").ignore_then(export_name_parser()).or_not())
        .then_ignore(keyword("from"))
        .then(string_parser())
        .map(|(alias, source)| match alias {
            Some(exported) => ExportDecl::Named {
                specifiers: vec![ExportSpecifier {
                    local: "*".to_string(),
                    exported,
                }],
                source: Some(source),
            },
            None => ExportDecl::All { source },
        });

    let named = export_specifier_parser()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .then(keyword("from").ignore_then(string_parser()).or_not())
        .map(|(specifiers, source)| ExportDecl::Named { specifiers, source });

    let declared = declaration_parser().map(ExportDecl::Declared);

    just(Token::Export)
        .ignore_then(choice((default, star, named, declared)))
        .then_ignore(just(Token::Semi).or_not())
        .labelled("export declaration")
        .boxed()
}

/// Export list entry: `a` or `a as b`
fn export_specifier_parser<'tokens, I>(
) -> impl Parser<'tokens, I, ExportSpecifier, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    export_name_parser()
        .then(keyword("as").ignore_then(export_name_parser()).or_not())
        .map(|(local, exported)| ExportSpecifier {
            exported: exported.unwrap_or_else(|| local.clone()),
            local,
        })
        .labelled("export specifier")
}

/// Declaration after `export`, yielding every name it binds.
fn declaration_parser<'tokens, I>() -> impl Parser<'tokens, I, Vec<String>, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    // `async function* name(params) { body }`
    let function = keyword("async")
        .or_not()
        .ignore_then(just(Token::Function))
        .ignore_then(just(Token::Star).or_not())
        .ignore_then(ident_parser())
        .then_ignore(group_parser())
        .then_ignore(group_parser())
        .map(|name| vec![name]);

    // `class Name extends Base { body }`
    let class = just(Token::Class)
        .ignore_then(ident_parser())
        .then_ignore(none_of([Token::LBrace]).repeated())
        .then_ignore(group_parser())
        .map(|name| vec![name]);

    let variables = choice((just(Token::Var), just(Token::Let), just(Token::Const)))
        .ignore_then(
            binding_pattern_parser()
                .then_ignore(just(Token::Eq).ignore_then(initializer_parser()).or_not())
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map(|bindings: Vec<Vec<String>>| bindings.into_iter().flatten().collect());

    choice((function, class, variables))
        .labelled("declaration")
        .boxed()
}

/// Binding target of a variable declarator: identifier, object pattern or
/// array pattern. Yields the bound names in source order.
fn binding_pattern_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Vec<String>, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|pattern| {
        let default_value = just(Token::Eq).ignore_then(
            choice((
                group_parser(),
                none_of([
                    Token::Comma,
                    Token::LBrace,
                    Token::RBrace,
                    Token::LParen,
                    Token::RParen,
                    Token::LBracket,
                    Token::RBracket,
                ])
                .ignored(),
            ))
            .repeated()
            .at_least(1),
        );

        let rest = just(Token::Dot)
            .repeated()
            .exactly(3)
            .ignore_then(pattern.clone());

        let key = choice((
            select! {
                Token::Ident(_) => (),
                Token::Str(_) => (),
                Token::Number => (),
                Token::Default => (),
            },
            group_parser(),
        ));

        let property = choice((
            rest.clone(),
            key.then_ignore(just(Token::Colon))
                .ignore_then(pattern.clone())
                .then_ignore(default_value.clone().or_not()),
            ident_parser()
                .then_ignore(default_value.clone().or_not())
                .map(|name| vec![name]),
        ));

        let object = property
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map(|parts: Vec<Vec<String>>| parts.into_iter().flatten().collect::<Vec<_>>());

        // Holes (`[, b]`) bind nothing.
        let element = choice((rest, pattern.then_ignore(default_value.or_not())))
            .or_not()
            .map(Option::unwrap_or_default);

        let array = element
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(|parts: Vec<Vec<String>>| parts.into_iter().flatten().collect::<Vec<_>>());

        choice((ident_parser().map(|name| vec![name]), object, array))
    })
    .labelled("binding pattern")
    .boxed()
}

/// Initializer expression of a declarator. Stops at the `,` separating
/// declarators and at anything that must begin a new statement.
fn initializer_parser<'tokens, I>() -> impl Parser<'tokens, I, (), Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    choice((
        group_parser(),
        none_of([
            Token::Comma,
            Token::Semi,
            Token::Import,
            Token::Export,
            Token::Var,
            Token::Let,
            Token::Const,
            Token::LBrace,
            Token::RBrace,
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
        ])
        .ignored(),
    ))
    .repeated()
    .at_least(1)
    .labelled("initializer")
    .boxed()
}

/// One unit of skipped top-level code: a single token or a balanced group.
fn chunk_parser<'tokens, I>() -> impl Parser<'tokens, I, (), Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    choice((
        group_parser(),
        none_of([
            Token::Import,
            Token::Export,
            Token::LBrace,
            Token::RBrace,
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
        ])
        .ignored(),
    ))
    .boxed()
}

/// Balanced `{}`, `()` or `[]` group with arbitrary contents.
fn group_parser<'tokens, I>() -> impl Parser<'tokens, I, (), Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|group| {
        let content = choice((
            group,
            none_of([
                Token::LBrace,
                Token::RBrace,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
            ])
            .ignored(),
        ))
        .repeated();

        choice((
            content
                .clone()
                .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            content
                .clone()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
            content.delimited_by(just(Token::LBracket), just(Token::RBracket)),
        ))
    })
    .labelled("balanced group")
    .boxed()
}

/// Contextual keyword such as `from` or `as`, lexed as an identifier.
fn keyword<'tokens, I>(word: &'static str) -> impl Parser<'tokens, I, (), Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    any()
        .filter(move |token: &Token| matches!(token, Token::Ident(s) if s == word))
        .ignored()
        .labelled(word)
}

/// Name as it may appear in an import or export list.
fn export_name_parser<'tokens, I>() -> impl Parser<'tokens, I, String, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::Ident(s) => s,
        Token::Str(s) => s,
        Token::Default => "default".to_string(),
    }
    .labelled("export name")
}

/// String literal parser.
fn string_parser<'tokens, I>() -> impl Parser<'tokens, I, String, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::Str(s) => s,
    }
    .labelled("string literal")
}

/// Identifier parser.
fn ident_parser<'tokens, I>() -> impl Parser<'tokens, I, String, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::Ident(s) => s,
    }
    .labelled("identifier")
}
