//! Syntax tree for the module outline of a source file.
//!
//! The parser keeps only what crosses module boundaries. Every other
//! top-level statement is reduced to [`Item::Other`].

/// A parsed source file: top-level items in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub items: Vec<Item>,
}

#[cfg(test)]
impl Module {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn exports(&self) -> impl Iterator<Item = &ExportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Export(decl) => Some(decl),
            _ => None,
        })
    }
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `import ... from "source"` or `import "source"`
    Import(ImportDecl),
    /// Any `export` form
    Export(ExportDecl),
    /// A run of statements with no module-boundary meaning
    Other,
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// The module specifier exactly as written, quotes removed.
    pub source: String,
    /// Empty for the bare form `import "source"`.
    pub specifiers: Vec<ImportSpecifier>,
}

/// One binding introduced by an import declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import local from "m"`
    Default { local: String },
    /// `import * as local from "m"`
    Namespace { local: String },
    /// `import { imported as local } from "m"`
    Named { imported: String, local: String },
}

/// An export declaration, classified once by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDecl {
    /// `export { a, b as c }` and `export { a } from "m"`
    Named {
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
    },
    /// `export const a = 1, { b } = o`, `export function f() {}`, `export class C {}`
    Declared(Vec<String>),
    /// `export default ...`
    Default,
    /// `export * from "m"`
    All { source: String },
}

/// One entry of an export list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// Name inside this module (`*` for `export * as ns from "m"`).
    pub local: String,
    /// Name other modules import.
    pub exported: String,
}
