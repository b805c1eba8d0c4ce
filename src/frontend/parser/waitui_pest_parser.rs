use std::fs;
use std::mem;
use std::path::PathBuf;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::import_stack::{ImportStack, SourceState};
use super::{AstParser, ParserDebug, SourceContext};
use crate::frontend::ast::{
    AssignmentOperator, Ast, BinaryOperator, Class, Expression, Formal, Function,
    FunctionVisibility, Import, Initialization, Namespace, Program, Property, Symbol, SymbolKind,
    SymbolTable, UnaryOperator,
};
use crate::frontend::error::FrontendError;

/// Pest waitui parser parses a string into a series of token pairs.
/// These tokens are defined as a Context-Free-Grammar in the
/// src/frontend/waitui.pest file.
#[derive(Parser)]
#[grammar = "frontend/waitui.pest"]
struct WaituiParser;

/// PestWaituiParser is a concrete AstParser.
///
/// It uses the pest library to generate token pairs from a source string and
/// formalises them into the abstract syntax tree. While doing so it drives
/// the symbol table (declaration mode around binding constructs, scope
/// enter/exit around bodies) and the import stack whenever an `import`
/// switches the input to another file.
pub struct PestWaituiParser {
    symtable: SymbolTable,
    import_stack: ImportStack,
    file_name: String,
    working_directory: PathBuf,
    debug: ParserDebug,
    recovered_errors: usize,
}

impl PestWaituiParser {
    /// Parses a source string into the AST of a whole program.
    fn parse_into_ast(&mut self, source: &str) -> Result<Ast, FrontendError> {
        let mut pairs = WaituiParser::parse(Rule::program, source).map_err(|error| {
            FrontendError::Parse {
                file: self.file_name.clone(),
                message: error.to_string(),
            }
        })?;

        match pairs.next() {
            Some(pair) => Ok(Ast::new(self.parse_pair_program(pair, source)?)),
            None => Err(FrontendError::Parse {
                file: self.file_name.clone(),
                message: String::from("input was parsed without error but is empty"),
            }),
        }
    }

    /// Parses the program pair into the program node. Loose imports and
    /// classes outside an explicit namespace collect into the default
    /// namespace carrying the empty identifier as name.
    fn parse_pair_program(
        &mut self,
        pair: Pair<Rule>,
        source: &str,
    ) -> Result<Program, FrontendError> {
        let mut namespaces = Vec::new();
        let mut default_imports: Vec<Import> = Vec::new();
        let mut default_classes: Vec<Class> = Vec::new();

        let mut default_scope_open = false;

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::namespace_declaration => {
                    if default_scope_open {
                        self.symtable.exit_scope();
                        default_scope_open = false;
                    }
                    namespaces.push(self.parse_pair_namespace(item, source)?);
                }
                Rule::import_declaration => {
                    if !default_scope_open {
                        self.symtable.enter_scope();
                        default_scope_open = true;
                    }
                    self.include_import(item, source, &mut default_imports, &mut default_classes)?;
                }
                Rule::class_declaration => {
                    if !default_scope_open {
                        self.symtable.enter_scope();
                        default_scope_open = true;
                    }
                    default_classes.push(self.parse_pair_class(item)?);
                }
                Rule::EOI => {}
                _ => unreachable!("unprocessed pest rule: {:?}", item.as_rule()),
            }
        }

        if default_scope_open {
            self.symtable.exit_scope();
        }

        if !default_imports.is_empty() || !default_classes.is_empty() {
            // The default namespace name stays out of the symbol table, it
            // is not mentioned anywhere in the source.
            namespaces.push(Namespace {
                name: Symbol::new("", SymbolKind::Identifier, 1, 1),
                imports: default_imports,
                classes: default_classes,
            });
        }

        Ok(Program { namespaces })
    }

    /// Parses a namespace pair with everything declared inside it.
    fn parse_pair_namespace(
        &mut self,
        pair: Pair<Rule>,
        source: &str,
    ) -> Result<Namespace, FrontendError> {
        let mut inner = pair.into_inner();

        let name_pair = inner.next().unwrap();
        let name = self.declare_symbol(&name_pair, SymbolKind::Identifier);

        self.symtable.enter_scope();

        let mut imports = Vec::new();
        let mut classes = Vec::new();
        for item in inner {
            match item.as_rule() {
                Rule::import_declaration => {
                    self.include_import(item, source, &mut imports, &mut classes)?;
                }
                Rule::class_declaration => classes.push(self.parse_pair_class(item)?),
                _ => unreachable!("unprocessed pest rule: {:?}", item.as_rule()),
            }
        }

        self.symtable.exit_scope();

        Ok(Namespace {
            name,
            imports,
            classes,
        })
    }

    /// Switch the input over to the file named by an import declaration.
    ///
    /// The current source is suspended on the import stack, the imported
    /// file is read from the working directory and its declarations are
    /// spliced into the surrounding namespace. Once the imported file is
    /// exhausted the suspended source is popped back.
    fn include_import(
        &mut self,
        pair: Pair<Rule>,
        outer_source: &str,
        imports: &mut Vec<Import>,
        classes: &mut Vec<Class>,
    ) -> Result<(), FrontendError> {
        let (line, column) = pair.as_span().start_pos().line_col();
        let name_pair = pair.into_inner().next().unwrap();

        let path = self
            .working_directory
            .join(format!("{}.wu", name_pair.as_str()));

        log::debug!(
            "including import '{}' from '{}'",
            name_pair.as_str(),
            path.display()
        );

        let imported_source =
            fs::read_to_string(&path).map_err(|source| FrontendError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let outer_file_name = mem::replace(&mut self.file_name, path.display().to_string());
        self.import_stack.push(SourceState::new(
            outer_file_name,
            outer_source.to_owned(),
            line,
            column,
        ));

        let result = self.parse_source_unit(&imported_source, imports, classes);

        if let Some(outer) = self.import_stack.pop() {
            self.file_name = outer.into_file_name();
        }

        result?;
        imports.push(Import);

        Ok(())
    }

    /// Parses an imported source unit, collecting its imports and classes
    /// into the surrounding namespace.
    fn parse_source_unit(
        &mut self,
        source: &str,
        imports: &mut Vec<Import>,
        classes: &mut Vec<Class>,
    ) -> Result<(), FrontendError> {
        let mut pairs = WaituiParser::parse(Rule::source_unit, source).map_err(|error| {
            FrontendError::Parse {
                file: self.file_name.clone(),
                message: error.to_string(),
            }
        })?;

        if let Some(pair) = pairs.next() {
            for item in pair.into_inner() {
                match item.as_rule() {
                    Rule::import_declaration => {
                        self.include_import(item, source, imports, classes)?;
                    }
                    Rule::class_declaration => classes.push(self.parse_pair_class(item)?),
                    Rule::EOI => {}
                    _ => unreachable!("unprocessed pest rule: {:?}", item.as_rule()),
                }
            }
        }

        Ok(())
    }

    /// Parses a class pair. The class name binds in the surrounding scope,
    /// parameters, the extends clause, properties and functions all live in
    /// the scope of the class body.
    fn parse_pair_class(&mut self, pair: Pair<Rule>) -> Result<Class, FrontendError> {
        if self.debug.contains(ParserDebug::PARSER) {
            log::trace!("reducing class declaration");
        }

        let mut inner = pair.into_inner();

        let name_pair = inner.next().unwrap();
        let name = self.declare_symbol(&name_pair, SymbolKind::Class);

        self.symtable.enter_scope();

        let mut parameters = Vec::new();
        let mut super_class = None;
        let mut super_class_args = Vec::new();
        let mut properties = Vec::new();
        let mut functions = Vec::new();

        for item in inner {
            match item.as_rule() {
                Rule::class_parameters => {
                    for formal_pair in item.into_inner() {
                        parameters.push(self.parse_pair_formal(formal_pair)?);
                    }
                }
                Rule::class_extends => {
                    let mut extends_inner = item.into_inner();
                    let super_pair = extends_inner.next().unwrap();
                    super_class = Some(self.reference_symbol(&super_pair, SymbolKind::Class));

                    if let Some(args_pair) = extends_inner.next() {
                        for arg in args_pair.into_inner() {
                            super_class_args.push(self.parse_pair_expression(arg)?);
                        }
                    }
                }
                Rule::property_declaration => properties.push(self.parse_pair_property(item)?),
                Rule::function_declaration => functions.push(self.parse_pair_function(item)?),
                _ => unreachable!("unprocessed pest rule: {:?}", item.as_rule()),
            }
        }

        self.symtable.exit_scope();

        Ok(Class {
            name,
            parameters,
            super_class,
            super_class_args,
            properties,
            functions,
        })
    }

    /// Parses a formal pair, declaring its identifier and referencing its
    /// type.
    fn parse_pair_formal(&mut self, pair: Pair<Rule>) -> Result<Formal, FrontendError> {
        let mut inner = pair.into_inner();

        let mut is_lazy = false;
        let mut item = inner.next().unwrap();
        if item.as_rule() == Rule::lazy_modifier {
            is_lazy = true;
            item = inner.next().unwrap();
        }

        let identifier = self.declare_symbol(&item, SymbolKind::Identifier);

        let type_pair = inner.next().unwrap();
        let type_name = self.reference_symbol(&type_pair, SymbolKind::Class);

        Ok(Formal {
            identifier,
            type_name,
            is_lazy,
        })
    }

    /// Parses a property pair with its optional initializer.
    fn parse_pair_property(&mut self, pair: Pair<Rule>) -> Result<Property, FrontendError> {
        let mut inner = pair.into_inner();

        let name_pair = inner.next().unwrap();
        let name = self.declare_symbol(&name_pair, SymbolKind::Identifier);

        let type_pair = inner.next().unwrap();
        let type_name = self.reference_symbol(&type_pair, SymbolKind::Class);

        let value = match inner.next() {
            Some(value_pair) => Some(self.parse_pair_expression(value_pair)?),
            None => None,
        };

        Ok(Property {
            name,
            type_name,
            value,
        })
    }

    /// Parses a function pair. The function name binds in the class scope,
    /// formals and the body live in the scope of the function.
    fn parse_pair_function(&mut self, pair: Pair<Rule>) -> Result<Function, FrontendError> {
        if self.debug.contains(ParserDebug::PARSER) {
            log::trace!("reducing function declaration");
        }

        let mut visibility = FunctionVisibility::Public;
        let mut is_abstract = false;
        let mut is_final = false;
        let mut is_overwrite = false;

        let mut name = None;
        let mut parameters = Vec::new();
        let mut return_type = None;
        let mut body = None;

        let mut entered_scope = false;

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::function_visibility => {
                    visibility = match item.as_str() {
                        "public" => FunctionVisibility::Public,
                        "protected" => FunctionVisibility::Protected,
                        "private" => FunctionVisibility::Private,
                        _ => unreachable!("unprocessed visibility: {}", item.as_str()),
                    };
                }
                Rule::function_modifier => match item.as_str() {
                    "abstract" => is_abstract = true,
                    "final" => is_final = true,
                    "overwrite" => is_overwrite = true,
                    _ => unreachable!("unprocessed modifier: {}", item.as_str()),
                },
                Rule::identifier => {
                    if name.is_none() {
                        name = Some(self.declare_symbol(&item, SymbolKind::Identifier));
                        self.symtable.enter_scope();
                        entered_scope = true;
                    } else {
                        return_type = Some(self.reference_symbol(&item, SymbolKind::Class));
                    }
                }
                Rule::formal => parameters.push(self.parse_pair_formal(item)?),
                Rule::function_body => {
                    let body_pair = item.into_inner().next().unwrap();
                    body = Some(self.parse_pair_expression(body_pair)?);
                }
                _ => unreachable!("unprocessed pest rule: {:?}", item.as_rule()),
            }
        }

        if entered_scope {
            self.symtable.exit_scope();
        }

        Ok(Function {
            name: name.unwrap(),
            parameters,
            return_type: return_type.unwrap(),
            body,
            visibility,
            is_abstract,
            is_final,
            is_overwrite,
        })
    }

    /// Parses all expression token pairs into a valid expression node.
    fn parse_pair_expression(&mut self, pair: Pair<Rule>) -> Result<Expression, FrontendError> {
        if self.debug.contains(ParserDebug::LEXER) {
            log::trace!("token pair {:?}: '{}'", pair.as_rule(), pair.as_str());
        }

        match pair.as_rule() {
            Rule::assignment => self.parse_pair_assignment(pair),
            Rule::disjunction
            | Rule::conjunction
            | Rule::equality
            | Rule::comparison
            | Rule::bitwise
            | Rule::term
            | Rule::factor => self.parse_pair_binary_expression(pair),
            Rule::unary => self.parse_pair_unary_expression(pair),
            Rule::postfix => self.parse_pair_postfix_expression(pair),
            Rule::integer => Ok(Expression::IntegerLiteral {
                value: pair.as_str().to_owned(),
            }),
            Rule::decimal => Ok(Expression::DecimalLiteral {
                value: pair.as_str().to_owned(),
            }),
            Rule::string => {
                let quoted = pair.as_str();
                Ok(Expression::StringLiteral {
                    value: quoted[1..quoted.len() - 1].to_owned(),
                })
            }
            Rule::boolean => Ok(Expression::BooleanLiteral {
                value: pair.as_str() == "true",
            }),
            Rule::null_literal => Ok(Expression::NullLiteral),
            Rule::this_literal => Ok(Expression::ThisLiteral),
            Rule::reference => {
                let identifier_pair = pair.into_inner().next().unwrap();
                Ok(Expression::Reference {
                    value: self.reference_symbol(&identifier_pair, SymbolKind::Identifier),
                })
            }
            Rule::let_expression => self.parse_pair_let_expression(pair),
            Rule::block => self.parse_pair_block(pair),
            Rule::if_else => self.parse_pair_if_else(pair),
            Rule::while_expression => self.parse_pair_while_expression(pair),
            Rule::constructor_call => self.parse_pair_constructor_call(pair),
            Rule::super_function_call => self.parse_pair_super_function_call(pair),
            Rule::function_call => self.parse_pair_function_call(pair, None),
            _ => unreachable!("unprocessed pest rule: {:?}", pair.as_rule()),
        }
    }

    /// Parses an assignment pair.
    fn parse_pair_assignment(&mut self, pair: Pair<Rule>) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let identifier_pair = inner.next().unwrap();
        let identifier = self.reference_symbol(&identifier_pair, SymbolKind::Identifier);

        let operator = match inner.next().unwrap().as_rule() {
            Rule::assign => AssignmentOperator::Equal,
            Rule::plus_equal => AssignmentOperator::PlusEqual,
            Rule::minus_equal => AssignmentOperator::MinusEqual,
            Rule::times_equal => AssignmentOperator::TimesEqual,
            Rule::div_equal => AssignmentOperator::DivEqual,
            Rule::modulo_equal => AssignmentOperator::ModuloEqual,
            Rule::and_equal => AssignmentOperator::AndEqual,
            Rule::caret_equal => AssignmentOperator::CaretEqual,
            Rule::tilde_equal => AssignmentOperator::TildeEqual,
            Rule::pipe_equal => AssignmentOperator::PipeEqual,
            rule => unreachable!("unprocessed assignment operator: {:?}", rule),
        };

        let value = self.parse_pair_expression(inner.next().unwrap())?;

        Ok(Expression::Assignment {
            identifier,
            operator,
            value: Box::new(value),
        })
    }

    /// Parses a pest token pair into a binary expression. A linear list of
    /// operations of equal precedence folds into a left-associative tree.
    fn parse_pair_binary_expression(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let mut left = self.parse_pair_expression(inner.next().unwrap())?;
        while inner.peek().is_some() {
            let operator = Self::parse_pair_binary_operator(&inner.next().unwrap());
            let right = self.parse_pair_expression(inner.next().unwrap())?;
            left = Expression::BinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses a pest token pair into a unary expression. Prefix operators
    /// apply innermost first.
    fn parse_pair_unary_expression(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Expression, FrontendError> {
        let mut pairs: Vec<Pair<Rule>> = pair.into_inner().collect();

        let postfix_pair = pairs.pop().unwrap();
        let mut expression = self.parse_pair_expression(postfix_pair)?;

        for operator_pair in pairs.into_iter().rev() {
            let operator = match operator_pair.as_rule() {
                Rule::unary_minus => UnaryOperator::Minus,
                Rule::unary_not => UnaryOperator::Not,
                Rule::double_plus => UnaryOperator::DoublePlus,
                Rule::double_minus => UnaryOperator::DoubleMinus,
                rule => unreachable!("unprocessed unary operator: {:?}", rule),
            };
            expression = Expression::UnaryExpression {
                operator,
                expression: Box::new(expression),
            };
        }

        Ok(expression)
    }

    /// Parses a postfix pair: a primary expression followed by method calls
    /// and casts applying left to right.
    fn parse_pair_postfix_expression(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let mut expression = self.parse_pair_expression(inner.next().unwrap())?;

        for suffix in inner {
            match suffix.as_rule() {
                Rule::method_call => {
                    let mut call_inner = suffix.into_inner();
                    let name_pair = call_inner.next().unwrap();
                    let function_name =
                        self.reference_symbol(&name_pair, SymbolKind::Identifier);
                    let args = self.parse_pair_call_args(call_inner.next().unwrap())?;

                    expression = Expression::FunctionCall {
                        object: Some(Box::new(expression)),
                        function_name,
                        args,
                    };
                }
                Rule::cast_suffix => {
                    let type_pair = suffix
                        .into_inner()
                        .find(|item| item.as_rule() == Rule::identifier)
                        .unwrap();
                    let type_name = self.reference_symbol(&type_pair, SymbolKind::Class);

                    expression = Expression::Cast {
                        object: Box::new(expression),
                        type_name,
                    };
                }
                _ => unreachable!("unprocessed pest rule: {:?}", suffix.as_rule()),
            }
        }

        Ok(expression)
    }

    /// Parses a let pair. The bindings live in their own scope spanning the
    /// initializations and the body.
    fn parse_pair_let_expression(&mut self, pair: Pair<Rule>) -> Result<Expression, FrontendError> {
        self.symtable.enter_scope();

        let mut initializations = Vec::new();
        let mut body = None;
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::initialization => {
                    initializations.push(self.parse_pair_initialization(item)?)
                }
                Rule::kw_in => {}
                _ => body = Some(self.parse_pair_expression(item)?),
            }
        }

        self.symtable.exit_scope();

        Ok(Expression::Let {
            initializations,
            body: Box::new(body.unwrap()),
        })
    }

    /// Parses a single let binding, declaring its identifier.
    fn parse_pair_initialization(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Initialization, FrontendError> {
        let mut inner = pair.into_inner();

        let identifier_pair = inner.next().unwrap();
        let identifier = self.declare_symbol(&identifier_pair, SymbolKind::Identifier);

        let type_pair = inner.next().unwrap();
        let type_name = self.reference_symbol(&type_pair, SymbolKind::Class);

        let value = match inner.next() {
            Some(value_pair) => Some(self.parse_pair_expression(value_pair)?),
            None => None,
        };

        Ok(Initialization {
            identifier,
            type_name,
            value,
        })
    }

    /// Parses a block pair into the list of its expressions.
    fn parse_pair_block(&mut self, pair: Pair<Rule>) -> Result<Expression, FrontendError> {
        let mut expressions = Vec::new();
        for item in pair.into_inner() {
            expressions.push(self.parse_pair_expression(item)?);
        }

        Ok(Expression::Block { expressions })
    }

    /// Parses an if else pair, the else branch is optional.
    fn parse_pair_if_else(&mut self, pair: Pair<Rule>) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let condition = self.parse_pair_expression(inner.next().unwrap())?;
        let then_branch = self.parse_pair_expression(inner.next().unwrap())?;

        let mut else_branch = None;
        for item in inner {
            match item.as_rule() {
                Rule::kw_else => {}
                _ => else_branch = Some(Box::new(self.parse_pair_expression(item)?)),
            }
        }

        Ok(Expression::IfElse {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
        })
    }

    /// Parses a while pair.
    fn parse_pair_while_expression(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let condition = self.parse_pair_expression(inner.next().unwrap())?;
        let body = self.parse_pair_expression(inner.next().unwrap())?;

        Ok(Expression::While {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    /// Parses a constructor call pair, referencing the class name.
    fn parse_pair_constructor_call(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let name_pair = inner.next().unwrap();
        let name = self.reference_symbol(&name_pair, SymbolKind::Class);
        let args = self.parse_pair_call_args(inner.next().unwrap())?;

        Ok(Expression::ConstructorCall { name, args })
    }

    /// Parses a super function call pair.
    fn parse_pair_super_function_call(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let name_pair = inner.next().unwrap();
        let function_name = self.reference_symbol(&name_pair, SymbolKind::Identifier);
        let args = self.parse_pair_call_args(inner.next().unwrap())?;

        Ok(Expression::SuperFunctionCall {
            function_name,
            args,
        })
    }

    /// Parses a function call pair, with or without an explicit object.
    fn parse_pair_function_call(
        &mut self,
        pair: Pair<Rule>,
        object: Option<Box<Expression>>,
    ) -> Result<Expression, FrontendError> {
        let mut inner = pair.into_inner();

        let name_pair = inner.next().unwrap();
        let function_name = self.reference_symbol(&name_pair, SymbolKind::Identifier);
        let args = self.parse_pair_call_args(inner.next().unwrap())?;

        Ok(Expression::FunctionCall {
            object,
            function_name,
            args,
        })
    }

    /// Parses the argument list of any call form.
    fn parse_pair_call_args(&mut self, pair: Pair<Rule>) -> Result<Vec<Expression>, FrontendError> {
        let mut args = Vec::new();
        for item in pair.into_inner() {
            args.push(self.parse_pair_expression(item)?);
        }

        Ok(args)
    }

    /// Parses a pest token pair into a binary operator.
    fn parse_pair_binary_operator(pair: &Pair<Rule>) -> BinaryOperator {
        match pair.as_rule() {
            Rule::plus => BinaryOperator::Plus,
            Rule::minus => BinaryOperator::Minus,
            Rule::times => BinaryOperator::Times,
            Rule::div => BinaryOperator::Div,
            Rule::modulo => BinaryOperator::Modulo,
            Rule::and => BinaryOperator::And,
            Rule::caret => BinaryOperator::Caret,
            Rule::tilde => BinaryOperator::Tilde,
            Rule::pipe => BinaryOperator::Pipe,
            Rule::less => BinaryOperator::Less,
            Rule::less_equal => BinaryOperator::LessEqual,
            Rule::greater => BinaryOperator::Greater,
            Rule::greater_equal => BinaryOperator::GreaterEqual,
            Rule::equal => BinaryOperator::Equal,
            Rule::not_equal => BinaryOperator::NotEqual,
            Rule::double_and => BinaryOperator::DoubleAnd,
            Rule::double_pipe => BinaryOperator::DoublePipe,
            rule => unreachable!("unprocessed binary operator: {:?}", rule),
        }
    }

    /// Intern an identifier occurrence as a declaration. A duplicate
    /// declaration keeps the first symbol, logs the clash with both
    /// positions and lets the parse continue.
    fn declare_symbol(&mut self, pair: &Pair<Rule>, kind: SymbolKind) -> Symbol {
        let (line, column) = pair.as_span().start_pos().line_col();
        let symbol = Symbol::new(pair.as_str(), kind, line, column);

        self.symtable.enter_declaration_mode();
        let result = self.symtable.add_symbol(symbol.clone());
        self.symtable.leave_declaration_mode();

        match result {
            Ok(canonical) => canonical,
            Err(error) => {
                log::error!("{}", error);
                self.recovered_errors += 1;
                self.symtable.lookup(pair.as_str()).unwrap_or(symbol)
            }
        }
    }

    /// Intern an identifier occurrence as a reference, folding it into the
    /// symbol already known for the identifier if there is one.
    fn reference_symbol(&mut self, pair: &Pair<Rule>, kind: SymbolKind) -> Symbol {
        let (line, column) = pair.as_span().start_pos().line_col();
        let symbol = Symbol::new(pair.as_str(), kind, line, column);

        match self.symtable.add_symbol(symbol.clone()) {
            Ok(canonical) => canonical,
            Err(error) => {
                // Outside declaration mode the table never reports a clash.
                log::error!("{}", error);
                self.recovered_errors += 1;
                symbol
            }
        }
    }
}

/// AstParser Trait Concrete Implementation
impl AstParser for PestWaituiParser {
    /// PestWaituiParser starts from a fresh symbol table and an empty
    /// import stack.
    fn default() -> Self {
        PestWaituiParser {
            symtable: SymbolTable::new(),
            import_stack: ImportStack::new(),
            file_name: String::new(),
            working_directory: PathBuf::new(),
            debug: ParserDebug::NONE,
            recovered_errors: 0,
        }
    }

    /// Parse processes a source string into an abstract syntax tree.
    fn parse(mut self, source: &str, context: &SourceContext) -> Result<Ast, FrontendError> {
        self.file_name = context.file_name.clone();
        self.working_directory = context.working_directory.clone();
        self.debug = context.debug;

        log::trace!("start parsing input from '{}'", self.file_name);

        let ast = self.parse_into_ast(source)?;

        if self.recovered_errors > 0 {
            log::warn!(
                "parsed '{}' with {} recovered error(s)",
                self.file_name,
                self.recovered_errors
            );
        } else {
            log::trace!("input from '{}' was parsed successful", self.file_name);
        }

        Ok(ast)
    }
}
