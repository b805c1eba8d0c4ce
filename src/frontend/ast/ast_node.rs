use strum_macros::Display;

use super::operators::{AssignmentOperator, BinaryOperator, UnaryOperator};
use super::symbol::Symbol;

/// Meta kind of an AST node. Every node is either a definition or an
/// expression, the concrete type is the sub kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstNodeType {
    Definition,
    Expression,
}

/// Visibility of a function within its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FunctionVisibility {
    #[strum(serialize = "public")]
    Public,
    #[strum(serialize = "protected")]
    Protected,
    #[strum(serialize = "private")]
    Private,
}

/// Root definition of a parsed translation. A program is a plain collection
/// of namespaces.
#[derive(Debug)]
pub struct Program {
    pub namespaces: Vec<Namespace>,
}

/// Namespace definition grouping imports and classes under a name.
/// Source files without an explicit namespace end up in the default
/// namespace whose name is the empty identifier.
#[derive(Debug)]
pub struct Namespace {
    pub name: Symbol,
    pub imports: Vec<Import>,
    pub classes: Vec<Class>,
}

/// Import definition. The node is an opaque marker for now, the imported
/// declarations are spliced into the surrounding namespace while parsing.
#[derive(Debug)]
pub struct Import;

/// Class definition.
///
/// # Example:
///     class Point(x: Int, y: Int) extends Shape(x) { ... }
///           ^^^^^ -> name   ^ -> parameters  ^^^^^ -> superClass
///
/// A class without an `extends` clause carries no super class symbol, the
/// front-end does not invent a default one.
#[derive(Debug)]
pub struct Class {
    pub name: Symbol,
    pub parameters: Vec<Formal>,
    pub super_class: Option<Symbol>,
    pub super_class_args: Vec<Expression>,
    pub properties: Vec<Property>,
    pub functions: Vec<Function>,
}

/// Formal is a declared parameter of a class or function.
///
/// # Example:
///     func scale(lazy factor: Int): Point
///                ^^^^^^^^^^^^^^^^ -> Formal
#[derive(Debug)]
pub struct Formal {
    pub identifier: Symbol,
    pub type_name: Symbol,
    pub is_lazy: bool,
}

/// Property is a named, typed member of a class with an optional
/// initializer.
#[derive(Debug)]
pub struct Property {
    pub name: Symbol,
    pub type_name: Symbol,
    pub value: Option<Expression>,
}

/// Function definition within a class. Abstract functions carry no body.
#[derive(Debug)]
pub struct Function {
    pub name: Symbol,
    pub parameters: Vec<Formal>,
    pub return_type: Symbol,
    pub body: Option<Expression>,
    pub visibility: FunctionVisibility,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_overwrite: bool,
}

/// A single binding inside a `let` expression.
///
/// # Example:
///     let x: Int = 1, y: Int in x + y
///         ^^^^^^^^^^ -> Initialization
#[derive(Debug)]
pub struct Initialization {
    pub identifier: Symbol,
    pub type_name: Symbol,
    pub value: Option<Expression>,
}

/// Expression nodes of the AST.
#[derive(Debug)]
pub enum Expression {
    /// Integer literal carried as its source spelling.
    IntegerLiteral { value: String },

    /// Decimal literal carried as its source spelling.
    DecimalLiteral { value: String },

    /// String literal with the surrounding quotes stripped.
    StringLiteral { value: String },

    BooleanLiteral { value: bool },

    NullLiteral,

    ThisLiteral,

    /// Mention of an identifier.
    Reference { value: Symbol },

    /// Assignment to an identifier in scope.
    ///
    /// # Example:
    ///     total += price;
    ///     ^^^^^^^^^^^^^^ -> Assignment
    Assignment {
        identifier: Symbol,
        operator: AssignmentOperator,
        value: Box<Expression>,
    },

    /// Cast of an expression to a named type.
    ///
    /// # Example:
    ///     shape as Circle
    Cast {
        object: Box<Expression>,
        type_name: Symbol,
    },

    /// Let introduces bindings visible in its body expression.
    ///
    /// # Example:
    ///     let x: Int = 2 in x * x
    Let {
        initializations: Vec<Initialization>,
        body: Box<Expression>,
    },

    /// Sequence of expressions evaluated in order.
    Block { expressions: Vec<Expression> },

    /// Instantiation of a class.
    ///
    /// # Example:
    ///     new Point(1, 2)
    ConstructorCall {
        name: Symbol,
        args: Vec<Expression>,
    },

    /// Call of a function, either on an explicit object or on the current
    /// one.
    ///
    /// # Example:
    ///     origin.distance(p)
    ///     ^^^^^^ -> object  ^ -> args
    FunctionCall {
        object: Option<Box<Expression>>,
        function_name: Symbol,
        args: Vec<Expression>,
    },

    /// Call of a function of the super class.
    SuperFunctionCall {
        function_name: Symbol,
        args: Vec<Expression>,
    },

    /// # Example:
    ///     a + b
    ///       ^ -> operator
    BinaryExpression {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },

    /// # Example:
    ///     !done
    ///     ^ -> operator
    UnaryExpression {
        operator: UnaryOperator,
        expression: Box<Expression>,
    },

    /// Conditional expression, the else branch is optional.
    IfElse {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Option<Box<Expression>>,
    },

    While {
        condition: Box<Expression>,
        body: Box<Expression>,
    },

    /// Opaque carrier reserved for later phases wrapping lazily evaluated
    /// expressions.
    LazyExpression { expression: Box<Expression> },

    /// Opaque carrier reserved for later phases backing native functions.
    NativeExpression,
}

/// Borrowed view onto any concrete AST node, used by the walker to hand
/// nodes to callbacks without giving up the typed tree.
#[derive(Clone, Copy)]
pub enum AstNodeRef<'a> {
    Program(&'a Program),
    Namespace(&'a Namespace),
    Import(&'a Import),
    Class(&'a Class),
    Formal(&'a Formal),
    Property(&'a Property),
    Function(&'a Function),
    Initialization(&'a Initialization),
    Expression(&'a Expression),
}

impl AstNodeRef<'_> {
    /// The meta kind of the viewed node.
    pub fn node_type(&self) -> AstNodeType {
        match self {
            AstNodeRef::Program(_)
            | AstNodeRef::Namespace(_)
            | AstNodeRef::Import(_)
            | AstNodeRef::Class(_)
            | AstNodeRef::Formal(_)
            | AstNodeRef::Property(_)
            | AstNodeRef::Function(_) => AstNodeType::Definition,
            AstNodeRef::Initialization(_) | AstNodeRef::Expression(_) => AstNodeType::Expression,
        }
    }
}
