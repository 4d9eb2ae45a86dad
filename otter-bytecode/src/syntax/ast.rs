//! Abstract syntax tree data types.

use super::location::Location;

/// A unary operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryOperator
{
    /// `-a`
    Negate,
    /// `not a`
    Not,
}

/// A binary operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryOperator
{
    /** `+`   */ Add,
    /** `-`   */ Subtract,
    /** `*`   */ Multiply,
    /** `/`   */ Divide,
    /** `==`  */ Equal,
    /** `!=`  */ NotEqual,
    /** `<`   */ Less,
    /** `<=`  */ LessEqual,
    /** `>`   */ Greater,
    /** `>=`  */ GreaterEqual,
    /** `and` */ And,
    /** `or`  */ Or,
}

/// Expression.
#[allow(missing_docs)]
#[derive(Debug)]
pub enum Expression<'a>
{
    IntegerLiteral{location: Location, value: i32},

    BooleanLiteral{location: Location, value: bool},

    Variable{location: Location, name: &'a str},

    Unary{
        operator:          UnaryOperator,
        operator_location: Location,
        operand:           &'a Expression<'a>,
    },

    Binary{
        left:              &'a Expression<'a>,
        operator:          BinaryOperator,
        operator_location: Location,
        right:             &'a Expression<'a>,
    },

    Assign{
        name:          &'a str,
        name_location: Location,
        value:         &'a Expression<'a>,
    },
}

/// Statement.
#[allow(missing_docs)]
#[derive(Debug)]
pub enum Statement<'a>
{
    Expression{expression: Expression<'a>},

    Print{print_keyword: Location, expression: Expression<'a>},

    Let{let_keyword: Location, name: &'a str, initializer: Expression<'a>},

    Block{statements: Vec<Statement<'a>>},

    If{
        if_keyword:  Location,
        condition:   Expression<'a>,
        then_branch: Box<Statement<'a>>,
        else_branch: Option<Box<Statement<'a>>>,
    },

    While{
        while_keyword: Location,
        condition:     Expression<'a>,
        body:          Box<Statement<'a>>,
    },
}
