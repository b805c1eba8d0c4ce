use std::ops::BitOr;
use std::path::PathBuf;

use super::ast::Ast;
use super::error::FrontendError;

pub mod import_stack;
pub mod waitui_pest_parser;

#[cfg(test)]
mod test;

/// Debug switches of a parse, kept as a bitmask so that both stages can be
/// toggled independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserDebug(u32);

impl ParserDebug {
    pub const NONE: ParserDebug = ParserDebug(0);
    /// Trace every token pair handed over by the grammar.
    pub const LEXER: ParserDebug = ParserDebug(1);
    /// Trace the driver while it formalises pairs into AST nodes.
    pub const PARSER: ParserDebug = ParserDebug(1 << 1);

    pub fn contains(self, other: ParserDebug) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for ParserDebug {
    type Output = ParserDebug;

    fn bitor(self, rhs: ParserDebug) -> ParserDebug {
        ParserDebug(self.0 | rhs.0)
    }
}

/// Everything a parse needs to know about where its source came from:
/// the file name for diagnostics, the directory imports are resolved
/// against and the debug switches.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub file_name: String,
    pub working_directory: PathBuf,
    pub debug: ParserDebug,
}

impl SourceContext {
    pub fn new(file_name: &str, working_directory: &str, debug: ParserDebug) -> Self {
        SourceContext {
            file_name: file_name.to_owned(),
            working_directory: PathBuf::from(working_directory),
            debug,
        }
    }
}

/// Parser handles interpretation of source text into the intermediate
/// representation. Put another way the parser turns a source string into an
/// abstract syntax tree, interning every identifier it meets into the
/// symbol table on the way.
pub trait AstParser {
    /// Creates a default configuration of an AstParser
    fn default() -> Self;

    /// Parse a source string into an Abstract Syntax Tree
    fn parse(self, source: &str, context: &SourceContext) -> Result<Ast, FrontendError>;
}

// Concrete Definition Export
pub use self::waitui_pest_parser::PestWaituiParser;
