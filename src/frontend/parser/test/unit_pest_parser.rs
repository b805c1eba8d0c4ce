use std::fs;

use crate::frontend::ast::{
    AssignmentOperator, Ast, BinaryOperator, Class, Expression, FunctionVisibility, Namespace,
    UnaryOperator,
};
use crate::frontend::error::FrontendError;
use crate::frontend::parser::{AstParser, ParserDebug, PestWaituiParser, SourceContext};

fn parse(source: &str) -> Ast {
    let context = SourceContext::new("test.wu", "", ParserDebug::NONE);
    PestWaituiParser::default()
        .parse(source, &context)
        .expect("source should parse")
}

fn single_class(ast: &Ast) -> &Class {
    let namespace = single_namespace(ast);
    assert_eq!(namespace.classes.len(), 1);
    &namespace.classes[0]
}

fn single_namespace(ast: &Ast) -> &Namespace {
    assert_eq!(ast.program().namespaces.len(), 1);
    &ast.program().namespaces[0]
}

fn function_body<'a>(class: &'a Class, index: usize) -> &'a Expression {
    class.functions[index]
        .body
        .as_ref()
        .expect("function should have a body")
}

#[test]
fn test_trivial_class() {
    let ast = parse("class Foo {}");

    let namespace = single_namespace(&ast);
    assert_eq!(namespace.name.identifier(), "");
    assert!(namespace.imports.is_empty());

    let class = &namespace.classes[0];
    assert_eq!(class.name.identifier(), "Foo");
    assert!(class.parameters.is_empty());
    assert!(class.super_class.is_none());
    assert!(class.super_class_args.is_empty());
    assert!(class.properties.is_empty());
    assert!(class.functions.is_empty());
}

#[test]
fn test_explicit_namespace() {
    let ast = parse("namespace geometry { class Point {} class Line {} }");

    let namespace = single_namespace(&ast);
    assert_eq!(namespace.name.identifier(), "geometry");
    assert_eq!(namespace.classes.len(), 2);
    assert_eq!(namespace.classes[0].name.identifier(), "Point");
    assert_eq!(namespace.classes[1].name.identifier(), "Line");
}

#[test]
fn test_class_with_parameters_and_super() {
    let ast = parse("class Circle(radius: Int, lazy label: String) extends Shape(radius) {}");

    let class = single_class(&ast);
    assert_eq!(class.parameters.len(), 2);
    assert_eq!(class.parameters[0].identifier.identifier(), "radius");
    assert_eq!(class.parameters[0].type_name.identifier(), "Int");
    assert!(!class.parameters[0].is_lazy);
    assert!(class.parameters[1].is_lazy);

    let super_class = class.super_class.as_ref().expect("super class expected");
    assert_eq!(super_class.identifier(), "Shape");
    assert_eq!(class.super_class_args.len(), 1);

    // The super class argument references the class parameter.
    match &class.super_class_args[0] {
        Expression::Reference { value } => {
            assert_eq!(*value, class.parameters[0].identifier);
        }
        other => panic!("expected reference, got {:?}", other),
    }
}

#[test]
fn test_property_with_initializer() {
    let ast = parse("class Foo { var count: Int = 0; var name: String; }");

    let class = single_class(&ast);
    assert_eq!(class.properties.len(), 2);
    assert_eq!(class.properties[0].name.identifier(), "count");
    assert!(matches!(
        class.properties[0].value,
        Some(Expression::IntegerLiteral { .. })
    ));
    assert!(class.properties[1].value.is_none());
}

#[test]
fn test_function_modifiers_and_visibility() {
    let ast = parse(
        "class Foo { protected abstract func area(): Int; \
         public final overwrite func name(): String = \"foo\" }",
    );

    let class = single_class(&ast);
    assert_eq!(class.functions.len(), 2);

    let area = &class.functions[0];
    assert_eq!(area.visibility, FunctionVisibility::Protected);
    assert!(area.is_abstract);
    assert!(!area.is_final);
    assert!(area.body.is_none());
    assert_eq!(area.return_type.identifier(), "Int");

    let name = &class.functions[1];
    assert_eq!(name.visibility, FunctionVisibility::Public);
    assert!(name.is_final);
    assert!(name.is_overwrite);
    assert!(matches!(
        name.body,
        Some(Expression::StringLiteral { .. })
    ));
}

#[test]
fn test_binary_expression_is_left_associative() {
    let ast = parse("class Foo { public func f(a: Int, b: Int, c: Int): Int = a + b + c }");

    let class = single_class(&ast);
    match function_body(class, 0) {
        Expression::BinaryExpression {
            left,
            operator: BinaryOperator::Plus,
            right,
        } => {
            match left.as_ref() {
                Expression::BinaryExpression {
                    left: inner_left,
                    operator: BinaryOperator::Plus,
                    right: inner_right,
                } => {
                    assert!(matches!(inner_left.as_ref(), Expression::Reference { value } if value.identifier() == "a"));
                    assert!(matches!(inner_right.as_ref(), Expression::Reference { value } if value.identifier() == "b"));
                }
                other => panic!("expected nested binary expression, got {:?}", other),
            }
            assert!(matches!(right.as_ref(), Expression::Reference { value } if value.identifier() == "c"));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_operator_precedence() {
    let ast = parse("class Foo { public func f(a: Int, b: Int, c: Int): Int = a + b * c }");

    let class = single_class(&ast);
    match function_body(class, 0) {
        Expression::BinaryExpression {
            left,
            operator: BinaryOperator::Plus,
            right,
        } => {
            assert!(matches!(left.as_ref(), Expression::Reference { .. }));
            assert!(matches!(
                right.as_ref(),
                Expression::BinaryExpression {
                    operator: BinaryOperator::Times,
                    ..
                }
            ));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_assignment_operators() {
    let ast = parse(
        "class Foo { public func f(x: Int): Int = { x += 1; x -= 2; x |= 3 } }",
    );

    let class = single_class(&ast);
    match function_body(class, 0) {
        Expression::Block { expressions } => {
            let operators: Vec<AssignmentOperator> = expressions
                .iter()
                .map(|expression| match expression {
                    Expression::Assignment { operator, .. } => *operator,
                    other => panic!("expected assignment, got {:?}", other),
                })
                .collect();
            assert_eq!(
                operators,
                vec![
                    AssignmentOperator::PlusEqual,
                    AssignmentOperator::MinusEqual,
                    AssignmentOperator::PipeEqual,
                ]
            );
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_unary_and_cast_and_calls() {
    let ast = parse(
        "class Foo { public func f(s: Shape): Int = \
         let r: Int = -s.area() in \
         if (!(r == 0)) r else (new Shape(r) as Shape).area() }",
    );

    let class = single_class(&ast);
    match function_body(class, 0) {
        Expression::Let {
            initializations,
            body,
        } => {
            assert_eq!(initializations.len(), 1);
            let value = initializations[0]
                .value
                .as_ref()
                .expect("initializer expected");
            // -s.area() applies the method call before the unary minus.
            match value {
                Expression::UnaryExpression {
                    operator: UnaryOperator::Minus,
                    expression,
                } => {
                    assert!(matches!(
                        expression.as_ref(),
                        Expression::FunctionCall {
                            object: Some(_),
                            ..
                        }
                    ));
                }
                other => panic!("expected unary expression, got {:?}", other),
            }

            match body.as_ref() {
                Expression::IfElse {
                    condition,
                    else_branch,
                    ..
                } => {
                    assert!(matches!(
                        condition.as_ref(),
                        Expression::UnaryExpression {
                            operator: UnaryOperator::Not,
                            ..
                        }
                    ));

                    // else branch: (new Shape(r) as Shape).area()
                    match else_branch.as_ref().expect("else branch expected").as_ref() {
                        Expression::FunctionCall { object, .. } => {
                            assert!(matches!(
                                object.as_ref().expect("object expected").as_ref(),
                                Expression::Cast { .. }
                            ));
                        }
                        other => panic!("expected function call, got {:?}", other),
                    }
                }
                other => panic!("expected if else, got {:?}", other),
            }
        }
        other => panic!("expected let, got {:?}", other),
    }
}

#[test]
fn test_while_and_super_call() {
    let ast = parse(
        "class Foo { public func f(n: Int): Int = while (n > 0) super.step(n) }",
    );

    let class = single_class(&ast);
    match function_body(class, 0) {
        Expression::While { condition, body } => {
            assert!(matches!(
                condition.as_ref(),
                Expression::BinaryExpression {
                    operator: BinaryOperator::Greater,
                    ..
                }
            ));
            assert!(matches!(
                body.as_ref(),
                Expression::SuperFunctionCall { .. }
            ));
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_literals() {
    let ast = parse(
        "class Foo { public func f(): Any = { 42; 1.5; \"hi\"; true; null; this } }",
    );

    let class = single_class(&ast);
    match function_body(class, 0) {
        Expression::Block { expressions } => {
            assert!(
                matches!(&expressions[0], Expression::IntegerLiteral { value } if value == "42")
            );
            assert!(
                matches!(&expressions[1], Expression::DecimalLiteral { value } if value == "1.5")
            );
            assert!(
                matches!(&expressions[2], Expression::StringLiteral { value } if value == "hi")
            );
            assert!(
                matches!(&expressions[3], Expression::BooleanLiteral { value: true })
            );
            assert!(matches!(&expressions[4], Expression::NullLiteral));
            assert!(matches!(&expressions[5], Expression::ThisLiteral));
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_formal_shadows_property() {
    let ast = parse("class Foo { var x: Int = 1; public func f(x: Int): Int = x }");

    let class = single_class(&ast);
    let property_symbol = &class.properties[0].name;
    let formal_symbol = &class.functions[0].parameters[0].identifier;

    // Shadowing produced two distinct symbols for the same identifier.
    assert_ne!(property_symbol, formal_symbol);

    // The body reference folded into the formal, not the property.
    assert_eq!(formal_symbol.references().len(), 2);
    assert_eq!(property_symbol.references().len(), 1);
}

#[test]
fn test_duplicate_class_declaration_recovers() {
    let ast = parse("class Foo {} class Foo {}");

    let namespace = single_namespace(&ast);
    assert_eq!(namespace.classes.len(), 2);

    // Both class nodes share the symbol of the first declaration, the
    // duplicate is discarded together with its position.
    assert_eq!(namespace.classes[0].name, namespace.classes[1].name);
    assert_eq!(namespace.classes[0].name.references().len(), 1);
}

#[test]
fn test_symbols_are_released_with_the_ast() {
    let ast = parse("class Foo { public func f(x: Int): Int = x + x + x + x }");

    let class = single_class(&ast);
    let symbol = class.functions[0].parameters[0].identifier.clone();

    // Declaration plus four references in the body.
    assert_eq!(symbol.references().len(), 5);

    let observer = symbol.downgrade();
    drop(symbol);

    // The AST is the only remaining owner, dropping it frees the symbol.
    assert!(observer.upgrade().is_some());
    drop(ast);
    assert!(observer.upgrade().is_none());
}

#[test]
fn test_type_references_fold_into_the_class_symbol() {
    let ast = parse("class Point {} class Line { var start: Point; var end: Point; }");

    let namespace = single_namespace(&ast);
    let point = &namespace.classes[0].name;
    let line = &namespace.classes[1];

    assert_eq!(line.properties[0].type_name, *point);
    assert_eq!(line.properties[1].type_name, *point);
    // Declaration plus the two property types.
    assert_eq!(point.references().len(), 3);
}

#[test]
fn test_syntax_error_reports_parse_failure() {
    let context = SourceContext::new("broken.wu", "", ParserDebug::NONE);
    let result = PestWaituiParser::default().parse("class {", &context);

    match result {
        Err(FrontendError::Parse { file, .. }) => assert_eq!(file, "broken.wu"),
        other => panic!("expected parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_import_splices_declarations() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("util.wu"), "class Util {}").expect("write util.wu");

    let context = SourceContext::new(
        "main.wu",
        dir.path().to_str().expect("utf-8 path"),
        ParserDebug::NONE,
    );
    let ast = PestWaituiParser::default()
        .parse("import util;\nclass Main {}", &context)
        .expect("import should parse");

    let namespace = &ast.program().namespaces[0];
    assert_eq!(namespace.imports.len(), 1);

    let names: Vec<String> = namespace
        .classes
        .iter()
        .map(|class| class.name.identifier())
        .collect();
    assert_eq!(names, vec!["Util", "Main"]);
}

#[test]
fn test_nested_imports() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("core.wu"), "class Core {}").expect("write core.wu");
    fs::write(dir.path().join("util.wu"), "import core;\nclass Util {}")
        .expect("write util.wu");

    let context = SourceContext::new(
        "main.wu",
        dir.path().to_str().expect("utf-8 path"),
        ParserDebug::NONE,
    );
    let ast = PestWaituiParser::default()
        .parse("import util;\nclass Main {}", &context)
        .expect("imports should parse");

    let namespace = &ast.program().namespaces[0];
    assert_eq!(namespace.imports.len(), 2);

    let names: Vec<String> = namespace
        .classes
        .iter()
        .map(|class| class.name.identifier())
        .collect();
    assert_eq!(names, vec!["Core", "Util", "Main"]);
}

#[test]
fn test_missing_import_is_an_io_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let context = SourceContext::new(
        "main.wu",
        dir.path().to_str().expect("utf-8 path"),
        ParserDebug::NONE,
    );
    let result = PestWaituiParser::default().parse("import missing;", &context);

    match result {
        Err(FrontendError::Io { path, .. }) => assert!(path.ends_with("missing.wu")),
        other => panic!("expected io error, got {:?}", other.map(|_| ())),
    }
}
