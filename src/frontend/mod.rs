pub mod ast;
pub mod error;
pub mod parser;
pub mod printer;

use std::fs;
use std::io::Read;
use std::path::Path;

use self::ast::Ast;
use self::error::FrontendError;
use self::parser::{AstParser, ParserDebug, SourceContext};
use self::printer::GraphPrinter;

/// Version of the waitui front-end.
pub const WAITUI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source file name standing for the process standard input.
pub const SOURCE_STDIN: &str = "stdin";

/// Frontend drives a single translation from source text to the abstract
/// syntax tree and its graph serialization. It holds the translation
/// configuration: the AstParser being used, the source origin and the debug
/// switches.
///
/// # Translation Diagram
/// waitui_code -> AstParser -> AbstractSyntaxTree -> GraphPrinter -> dot graph
pub struct Frontend<P: AstParser> {
    parser: Option<P>,
    context: SourceContext,
    source: String,
    result_ast: Option<Ast>,
}

impl<P: AstParser> Frontend<P> {
    /// Create a new frontend reading the source eagerly. The file name
    /// `stdin` reads the process standard input instead of a file. Any
    /// failure unwinds fully, nothing is kept half set up.
    pub fn new(
        source_file_name: &str,
        working_directory: &str,
        debug: ParserDebug,
    ) -> Result<Self, FrontendError> {
        log::trace!("creating new frontend for '{}'", source_file_name);

        let source = if source_file_name == SOURCE_STDIN {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| FrontendError::Io {
                    path: String::from(SOURCE_STDIN),
                    source,
                })?;
            buffer
        } else {
            fs::read_to_string(source_file_name).map_err(|source| FrontendError::Io {
                path: String::from(source_file_name),
                source,
            })?
        };

        Ok(Frontend {
            parser: Some(P::default()),
            context: SourceContext::new(source_file_name, working_directory, debug),
            source,
            result_ast: None,
        })
    }

    /// Create a frontend over an in-memory source, mainly for embedders
    /// that already hold the text.
    pub fn from_source(source_file_name: &str, source: &str, debug: ParserDebug) -> Self {
        Frontend {
            parser: Some(P::default()),
            context: SourceContext::new(source_file_name, "", debug),
            source: String::from(source),
            result_ast: None,
        }
    }

    /// Run the grammar to completion. On success the AST is retrievable
    /// through [`Frontend::ast`]. Parsing twice is a no-op.
    pub fn parse(&mut self) -> Result<(), FrontendError> {
        let parser = match self.parser.take() {
            Some(parser) => parser,
            None => return Ok(()),
        };

        self.result_ast = Some(parser.parse(&self.source, &self.context)?);

        Ok(())
    }

    pub fn ast(&self) -> Option<&Ast> {
        self.result_ast.as_ref()
    }

    pub fn take_ast(&mut self) -> Option<Ast> {
        self.result_ast.take()
    }

    /// Serialize the parsed AST with the given printer and write it to
    /// `path`. Without a parsed AST nothing is written.
    pub fn generate_graph_file<G: GraphPrinter>(&self, path: &Path) -> Result<(), FrontendError> {
        let ast = match &self.result_ast {
            Some(ast) => ast,
            None => {
                log::warn!("no ast to serialize, skipping '{}'", path.display());
                return Ok(());
            }
        };

        let graph = G::default().generate_graph(ast);

        fs::write(path, graph).map_err(|source| FrontendError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Frontend Module Tests
#[cfg(test)]
mod tests {
    use super::parser::{ParserDebug, PestWaituiParser};
    use super::printer::{DotPrinter, GraphPrinter};
    use super::Frontend;

    #[test]
    fn test_trivial_class_translation() {
        let mut frontend =
            Frontend::<PestWaituiParser>::from_source("test.wu", "class Foo {}", ParserDebug::NONE);
        frontend.parse().expect("parse should succeed");

        let ast = frontend.ast().expect("ast should be available");
        let graph = DotPrinter::default().generate_graph(ast);

        let expected = concat!(
            "digraph AST {\n",
            "\tnode [shape=plain]\n",
            "\tProgram0 [label=<",
            "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">",
            "<TR><TD COLSPAN=\"2\"><B>Program</B></TD></TR>",
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"program_namespaces0\">namespaces</TD></TR>",
            "</TABLE>>];\n",
            "\tProgram0:program_namespaces0 -> Namespace1;\n",
            "\tNamespace1 [label=<",
            "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">",
            "<TR><TD COLSPAN=\"2\"><B>Namespace</B></TD></TR>",
            "<TR><TD ALIGN=\"LEFT\">name:</TD><TD ALIGN=\"LEFT\"></TD></TR>",
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"namespace_classes1\">classes</TD></TR>",
            "</TABLE>>];\n",
            "\tNamespace1:namespace_classes1 -> Class2;\n",
            "\tClass2 [label=<",
            "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">",
            "<TR><TD COLSPAN=\"2\"><B>Class</B></TD></TR>",
            "<TR><TD ALIGN=\"LEFT\">name:</TD><TD ALIGN=\"LEFT\">Foo</TD></TR>",
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"class_parameters2\">parameters</TD></TR>",
            "<TR><TD ALIGN=\"LEFT\">super:</TD><TD ALIGN=\"LEFT\"></TD></TR>",
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"class_super_class_args2\">superClassArgs</TD></TR>",
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"class_properties2\">properties</TD></TR>",
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"class_functions2\">functions</TD></TR>",
            "</TABLE>>];\n",
            "}\n",
        );
        assert_eq!(graph, expected);
    }

    #[test]
    fn test_parse_twice_is_a_no_op() {
        let mut frontend =
            Frontend::<PestWaituiParser>::from_source("test.wu", "class Foo {}", ParserDebug::NONE);
        frontend.parse().expect("first parse should succeed");
        frontend.parse().expect("second parse should be a no-op");

        assert!(frontend.ast().is_some());
    }

    #[test]
    fn test_take_ast_moves_the_result_out() {
        let mut frontend =
            Frontend::<PestWaituiParser>::from_source("test.wu", "class Foo {}", ParserDebug::NONE);
        frontend.parse().expect("parse should succeed");

        assert!(frontend.take_ast().is_some());
        assert!(frontend.ast().is_none());
    }
}
