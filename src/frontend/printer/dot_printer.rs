use super::GraphPrinter;
use crate::frontend::ast::{
    execute_callbacks, Ast, AstCallbacks, AstNodeRef, Class, Expression, Formal, Function,
    Initialization, Namespace, Program, Property, Symbol,
};

const TABLE_BEGIN: &str = "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">";
const TABLE_END: &str = "</TABLE>";

/// DotPrinter is a concrete GraphPrinter emitting a Graphviz DOT graph.
///
/// Every AST node renders as a plain-shape node with an HTML-like table
/// label: a title row, key/value rows for scalar fields and PORT carrying
/// rows for link sites, so edges can attach to the slot they belong to.
/// The output is a pure function of the AST, node ids come from a counter
/// that increments per visited node.
pub struct DotPrinter;

impl GraphPrinter for DotPrinter {
    /// DotPrinter has no configuration, the default is just instantiation.
    fn default() -> Self {
        DotPrinter
    }

    fn generate_graph(self, ast: &Ast) -> String {
        log::trace!("start generating the ast graph");

        let mut state = DotPrinterState {
            output: String::new(),
            node_count: 0,
        };

        state.output.push_str("digraph AST {\n");
        state.output.push_str("\tnode [shape=plain]\n");

        ast.walk(&dot_callbacks(), &mut state);

        state.output.push_str("}\n");

        log::trace!("end generating the ast graph");

        state.output
    }
}

/// Visitor state of one graph generation.
struct DotPrinterState {
    output: String,
    node_count: u64,
}

/// The callbacks every node of the AST is visited with. The node callback
/// recurses into children through the same machinery.
fn dot_callbacks() -> AstCallbacks<DotPrinterState> {
    AstCallbacks {
        pre_node: None,
        node: Some(print_node),
        post_node: None,
    }
}

impl DotPrinterState {
    fn next_node_count(&mut self) -> u64 {
        let node_count = self.node_count;
        self.node_count += 1;
        node_count
    }

    /// Escape text for use inside an HTML-like label.
    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    fn symbol_text(symbol: &Symbol) -> String {
        symbol.identifier()
    }

    fn optional_symbol_text(symbol: &Option<Symbol>) -> String {
        symbol
            .as_ref()
            .map(Self::symbol_text)
            .unwrap_or_default()
    }

    fn title_row(title: &str) -> String {
        format!("<TR><TD COLSPAN=\"2\"><B>{}</B></TD></TR>", title)
    }

    fn key_value_row(key: &str, value: &str) -> String {
        format!(
            "<TR><TD ALIGN=\"LEFT\">{}:</TD><TD ALIGN=\"LEFT\">{}</TD></TR>",
            key,
            Self::escape(value)
        )
    }

    fn key_port_row(port: &str, node_count: u64, key: &str) -> String {
        format!(
            "<TR><TD ALIGN=\"LEFT\" COLSPAN=\"2\" PORT=\"{}{}\">{}</TD></TR>",
            port, node_count, key
        )
    }

    fn print_graph_node(&mut self, title: &str, node_count: u64, rows: &str) {
        self.output.push_str(&format!(
            "\t{}{} [label=<{}{}{}>];\n",
            title, node_count, TABLE_BEGIN, rows, TABLE_END
        ));
    }

    /// Print the left half of an edge. The visited child completes it.
    fn print_graph_link_left(&mut self, title: &str, port: &str, node_count: u64) {
        self.output
            .push_str(&format!("\t{}{}:{}{} -> ", title, node_count, port, node_count));
    }

    /// Complete the pending edge of the parent with our own node name.
    fn print_graph_link_right(&mut self, title: &str, node_count: u64) {
        self.output.push_str(&format!("{}{};\n", title, node_count));
    }

    fn visit_expression(&mut self, expression: &Expression) {
        execute_callbacks(&dot_callbacks(), AstNodeRef::Expression(expression), self);
    }
}

/// Print the AST node, dispatching on its concrete type.
fn print_node(node: AstNodeRef, state: &mut DotPrinterState) {
    match node {
        AstNodeRef::Program(program) => print_program(program, state),
        AstNodeRef::Namespace(namespace) => print_namespace(namespace, state),
        AstNodeRef::Import(_) => {}
        AstNodeRef::Class(class) => print_class(class, state),
        AstNodeRef::Formal(formal) => print_formal(formal, state),
        AstNodeRef::Property(property) => print_property(property, state),
        AstNodeRef::Function(function) => print_function(function, state),
        AstNodeRef::Initialization(initialization) => {
            print_initialization(initialization, state)
        }
        AstNodeRef::Expression(expression) => print_expression(expression, state),
    }
}

/// Print the Program AST node.
fn print_program(program: &Program, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Program";

    let rows = format!(
        "{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_port_row("program_namespaces", node_count, "namespaces")
    );
    state.print_graph_node(title, node_count, &rows);

    for namespace in &program.namespaces {
        state.print_graph_link_left(title, "program_namespaces", node_count);
        execute_callbacks(&dot_callbacks(), AstNodeRef::Namespace(namespace), state);
    }
}

/// Print the Namespace AST node.
fn print_namespace(namespace: &Namespace, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Namespace";

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row("name", &DotPrinterState::symbol_text(&namespace.name)),
        DotPrinterState::key_port_row("namespace_classes", node_count, "classes")
    );
    state.print_graph_node(title, node_count, &rows);

    for class in &namespace.classes {
        state.print_graph_link_left(title, "namespace_classes", node_count);
        execute_callbacks(&dot_callbacks(), AstNodeRef::Class(class), state);
    }
}

/// Print the Class AST node.
fn print_class(class: &Class, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Class";

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}{}{}{}{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row("name", &DotPrinterState::symbol_text(&class.name)),
        DotPrinterState::key_port_row("class_parameters", node_count, "parameters"),
        DotPrinterState::key_value_row(
            "super",
            &DotPrinterState::optional_symbol_text(&class.super_class)
        ),
        DotPrinterState::key_port_row("class_super_class_args", node_count, "superClassArgs"),
        DotPrinterState::key_port_row("class_properties", node_count, "properties"),
        DotPrinterState::key_port_row("class_functions", node_count, "functions")
    );
    state.print_graph_node(title, node_count, &rows);

    for formal in &class.parameters {
        state.print_graph_link_left(title, "class_parameters", node_count);
        execute_callbacks(&dot_callbacks(), AstNodeRef::Formal(formal), state);
    }

    for arg in &class.super_class_args {
        state.print_graph_link_left(title, "class_super_class_args", node_count);
        state.visit_expression(arg);
    }

    for property in &class.properties {
        state.print_graph_link_left(title, "class_properties", node_count);
        execute_callbacks(&dot_callbacks(), AstNodeRef::Property(property), state);
    }

    for function in &class.functions {
        state.print_graph_link_left(title, "class_functions", node_count);
        execute_callbacks(&dot_callbacks(), AstNodeRef::Function(function), state);
    }
}

/// Print the Formal AST node.
fn print_formal(formal: &Formal, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Formal";

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row(
            "identifier",
            &DotPrinterState::symbol_text(&formal.identifier)
        ),
        DotPrinterState::key_value_row("type", &DotPrinterState::symbol_text(&formal.type_name)),
        DotPrinterState::key_value_row("isLazy", bool_text(formal.is_lazy))
    );
    state.print_graph_node(title, node_count, &rows);
}

/// Print the Property AST node.
fn print_property(property: &Property, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Property";

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row("name", &DotPrinterState::symbol_text(&property.name)),
        DotPrinterState::key_value_row("type", &DotPrinterState::symbol_text(&property.type_name)),
        DotPrinterState::key_port_row("property_value", node_count, "value")
    );
    state.print_graph_node(title, node_count, &rows);

    if let Some(value) = &property.value {
        state.print_graph_link_left(title, "property_value", node_count);
        state.visit_expression(value);
    }
}

/// Print the Function AST node.
fn print_function(function: &Function, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Function";

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}{}{}{}{}{}{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row("name", &DotPrinterState::symbol_text(&function.name)),
        DotPrinterState::key_port_row("function_parameters", node_count, "parameters"),
        DotPrinterState::key_value_row(
            "returnType",
            &DotPrinterState::symbol_text(&function.return_type)
        ),
        DotPrinterState::key_value_row("visibility", &function.visibility.to_string()),
        DotPrinterState::key_value_row("isAbstract", bool_text(function.is_abstract)),
        DotPrinterState::key_value_row("isFinal", bool_text(function.is_final)),
        DotPrinterState::key_value_row("isOverwrite", bool_text(function.is_overwrite)),
        DotPrinterState::key_port_row("function_body", node_count, "body")
    );
    state.print_graph_node(title, node_count, &rows);

    for formal in &function.parameters {
        state.print_graph_link_left(title, "function_parameters", node_count);
        execute_callbacks(&dot_callbacks(), AstNodeRef::Formal(formal), state);
    }

    if let Some(body) = &function.body {
        state.print_graph_link_left(title, "function_body", node_count);
        state.visit_expression(body);
    }
}

/// Print the Initialization AST node.
fn print_initialization(initialization: &Initialization, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();
    let title = "Initialization";

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row(
            "identifier",
            &DotPrinterState::symbol_text(&initialization.identifier)
        ),
        DotPrinterState::key_value_row(
            "type",
            &DotPrinterState::symbol_text(&initialization.type_name)
        ),
        DotPrinterState::key_port_row("initialization_value", node_count, "value")
    );
    state.print_graph_node(title, node_count, &rows);

    if let Some(value) = &initialization.value {
        state.print_graph_link_left(title, "initialization_value", node_count);
        state.visit_expression(value);
    }
}

/// Print an expression AST node, dispatching on its sub kind.
fn print_expression(expression: &Expression, state: &mut DotPrinterState) {
    match expression {
        Expression::IntegerLiteral { value } => {
            print_value_leaf("IntegerLiteral", value, state);
        }
        Expression::DecimalLiteral { value } => {
            print_value_leaf("DecimalLiteral", value, state);
        }
        Expression::StringLiteral { value } => {
            print_value_leaf("StringLiteral", value, state);
        }
        Expression::BooleanLiteral { value } => {
            print_value_leaf("BooleanLiteral", bool_text(*value), state);
        }
        Expression::NullLiteral => print_empty_leaf("NullLiteral", state),
        Expression::ThisLiteral => print_empty_leaf("ThisLiteral", state),
        Expression::Reference { value } => {
            print_value_leaf("Reference", &DotPrinterState::symbol_text(value), state);
        }
        Expression::Assignment {
            identifier,
            operator,
            value,
        } => {
            let node_count = state.next_node_count();
            let title = "Assignment";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_value_row(
                    "identifier",
                    &DotPrinterState::symbol_text(identifier)
                ),
                DotPrinterState::key_value_row("operator", &operator.to_string()),
                DotPrinterState::key_port_row("assignment_value", node_count, "value")
            );
            state.print_graph_node(title, node_count, &rows);

            state.print_graph_link_left(title, "assignment_value", node_count);
            state.visit_expression(value);
        }
        Expression::Cast { object, type_name } => {
            let node_count = state.next_node_count();
            let title = "Cast";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("cast_object", node_count, "object"),
                DotPrinterState::key_value_row("type", &DotPrinterState::symbol_text(type_name))
            );
            state.print_graph_node(title, node_count, &rows);

            state.print_graph_link_left(title, "cast_object", node_count);
            state.visit_expression(object);
        }
        Expression::Let {
            initializations,
            body,
        } => {
            let node_count = state.next_node_count();
            let title = "Let";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("let_initializations", node_count, "initializations"),
                DotPrinterState::key_port_row("let_body", node_count, "body")
            );
            state.print_graph_node(title, node_count, &rows);

            for initialization in initializations {
                state.print_graph_link_left(title, "let_initializations", node_count);
                execute_callbacks(
                    &dot_callbacks(),
                    AstNodeRef::Initialization(initialization),
                    state,
                );
            }

            state.print_graph_link_left(title, "let_body", node_count);
            state.visit_expression(body);
        }
        Expression::Block { expressions } => {
            let node_count = state.next_node_count();
            let title = "Block";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("block_expressions", node_count, "expressions")
            );
            state.print_graph_node(title, node_count, &rows);

            for expression in expressions {
                state.print_graph_link_left(title, "block_expressions", node_count);
                state.visit_expression(expression);
            }
        }
        Expression::ConstructorCall { name, args } => {
            let node_count = state.next_node_count();
            let title = "ConstructorCall";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_value_row("name", &DotPrinterState::symbol_text(name)),
                DotPrinterState::key_port_row("constructor_call_args", node_count, "args")
            );
            state.print_graph_node(title, node_count, &rows);

            for arg in args {
                state.print_graph_link_left(title, "constructor_call_args", node_count);
                state.visit_expression(arg);
            }
        }
        Expression::FunctionCall {
            object,
            function_name,
            args,
        } => {
            let node_count = state.next_node_count();
            let title = "FunctionCall";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("function_call_object", node_count, "object"),
                DotPrinterState::key_value_row(
                    "functionName",
                    &DotPrinterState::symbol_text(function_name)
                ),
                DotPrinterState::key_port_row("function_call_args", node_count, "args")
            );
            state.print_graph_node(title, node_count, &rows);

            if let Some(object) = object {
                state.print_graph_link_left(title, "function_call_object", node_count);
                state.visit_expression(object);
            }

            for arg in args {
                state.print_graph_link_left(title, "function_call_args", node_count);
                state.visit_expression(arg);
            }
        }
        Expression::SuperFunctionCall {
            function_name,
            args,
        } => {
            let node_count = state.next_node_count();
            let title = "SuperFunctionCall";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_value_row(
                    "functionName",
                    &DotPrinterState::symbol_text(function_name)
                ),
                DotPrinterState::key_port_row("super_function_call_args", node_count, "args")
            );
            state.print_graph_node(title, node_count, &rows);

            for arg in args {
                state.print_graph_link_left(title, "super_function_call_args", node_count);
                state.visit_expression(arg);
            }
        }
        Expression::BinaryExpression {
            left,
            operator,
            right,
        } => {
            let node_count = state.next_node_count();
            let title = "BinaryExpression";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("binary_expression_left", node_count, "left"),
                DotPrinterState::key_value_row("operator", &operator.to_string()),
                DotPrinterState::key_port_row("binary_expression_right", node_count, "right")
            );
            state.print_graph_node(title, node_count, &rows);

            state.print_graph_link_left(title, "binary_expression_left", node_count);
            state.visit_expression(left);

            state.print_graph_link_left(title, "binary_expression_right", node_count);
            state.visit_expression(right);
        }
        Expression::UnaryExpression {
            operator,
            expression,
        } => {
            let node_count = state.next_node_count();
            let title = "UnaryExpression";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_value_row("operator", &operator.to_string()),
                DotPrinterState::key_port_row(
                    "unary_expression_expression",
                    node_count,
                    "expression"
                )
            );
            state.print_graph_node(title, node_count, &rows);

            state.print_graph_link_left(title, "unary_expression_expression", node_count);
            state.visit_expression(expression);
        }
        Expression::IfElse {
            condition,
            then_branch,
            else_branch,
        } => {
            let node_count = state.next_node_count();
            let title = "IfElse";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("if_else_condition", node_count, "condition"),
                DotPrinterState::key_port_row("if_else_then", node_count, "thenBranch"),
                DotPrinterState::key_port_row("if_else_else", node_count, "elseBranch")
            );
            state.print_graph_node(title, node_count, &rows);

            state.print_graph_link_left(title, "if_else_condition", node_count);
            state.visit_expression(condition);

            state.print_graph_link_left(title, "if_else_then", node_count);
            state.visit_expression(then_branch);

            if let Some(else_branch) = else_branch {
                state.print_graph_link_left(title, "if_else_else", node_count);
                state.visit_expression(else_branch);
            }
        }
        Expression::While { condition, body } => {
            let node_count = state.next_node_count();
            let title = "While";

            state.print_graph_link_right(title, node_count);

            let rows = format!(
                "{}{}{}",
                DotPrinterState::title_row(title),
                DotPrinterState::key_port_row("while_condition", node_count, "condition"),
                DotPrinterState::key_port_row("while_body", node_count, "body")
            );
            state.print_graph_node(title, node_count, &rows);

            state.print_graph_link_left(title, "while_condition", node_count);
            state.visit_expression(condition);

            state.print_graph_link_left(title, "while_body", node_count);
            state.visit_expression(body);
        }
        Expression::LazyExpression { .. } => {
            log::trace!("skipping the content of a lazy expression carrier");
            print_empty_leaf("LazyExpression", state);
        }
        Expression::NativeExpression => {
            log::trace!("skipping the content of a native expression carrier");
            print_empty_leaf("NativeExpression", state);
        }
    }
}

/// Print a leaf node carrying a single value row.
fn print_value_leaf(title: &str, value: &str, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();

    state.print_graph_link_right(title, node_count);

    let rows = format!(
        "{}{}",
        DotPrinterState::title_row(title),
        DotPrinterState::key_value_row("value", value)
    );
    state.print_graph_node(title, node_count, &rows);
}

/// Print a leaf node with nothing but its title.
fn print_empty_leaf(title: &str, state: &mut DotPrinterState) {
    let node_count = state.next_node_count();

    state.print_graph_link_right(title, node_count);

    let rows = DotPrinterState::title_row(title);
    state.print_graph_node(title, node_count, &rows);
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
