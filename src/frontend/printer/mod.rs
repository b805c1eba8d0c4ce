use super::ast::Ast;

pub mod dot_printer;

/// GraphPrinter serializes an abstract syntax tree into a textual graph
/// description for debugging.
pub trait GraphPrinter {
    /// Creates a default configuration of a GraphPrinter
    fn default() -> Self;

    /// Serialize the AST into the graph description.
    fn generate_graph(self, ast: &Ast) -> String;
}

// Concrete Definition Export
pub use self::dot_printer::DotPrinter;
