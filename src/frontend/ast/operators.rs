use strum_macros::Display;

/// Assignment operators combine the assigned value with the previous one.
/// Plain `=` replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AssignmentOperator {
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "+=")]
    PlusEqual,
    #[strum(serialize = "-=")]
    MinusEqual,
    #[strum(serialize = "*=")]
    TimesEqual,
    #[strum(serialize = "/=")]
    DivEqual,
    #[strum(serialize = "%=")]
    ModuloEqual,
    #[strum(serialize = "&=")]
    AndEqual,
    #[strum(serialize = "^=")]
    CaretEqual,
    #[strum(serialize = "~=")]
    TildeEqual,
    #[strum(serialize = "|=")]
    PipeEqual,
}

/// Binary operations are expression operations with two arguments.
///
/// # Syntax:
///     <left> <op> <right>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinaryOperator {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Times,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Modulo,
    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "^")]
    Caret,
    #[strum(serialize = "~")]
    Tilde,
    #[strum(serialize = "|")]
    Pipe,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessEqual,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterEqual,
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
    #[strum(serialize = "&&")]
    DoubleAnd,
    #[strum(serialize = "||")]
    DoublePipe,
}

/// Unary operations are expression operations with one argument.
///
/// # Syntax:
///     <op> <expression>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnaryOperator {
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "++")]
    DoublePlus,
    #[strum(serialize = "--")]
    DoubleMinus,
}
