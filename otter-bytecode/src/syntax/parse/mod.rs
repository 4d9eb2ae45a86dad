//! Parsing sequences of tokens into abstract syntax trees.

pub use self::{arenas::*, error::*};

use {
    self::combinators::*,
    super::{ast::*, lex::{self, Lexeme, Token}, location::Location},
    std::iter::Peekable,
};

mod arenas;
mod error;

#[macro_use]
mod combinators;

/// Parse a sequence of statements until the lexemes are exhausted.
pub fn parse_program<'a, I>(
    arenas: &Arenas<'a>,
    lexemes: &mut Peekable<I>,
) -> Result<Vec<Statement<'a>>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let mut statements = Vec::new();
    while lexemes.peek().is_some() {
        statements.push(parse_statement(arenas, lexemes)?);
    }
    Ok(statements)
}

/* -------------------------------------------------------------------------- */
/*                                 Statements                                 */
/* -------------------------------------------------------------------------- */

/// Parse a single statement.
pub fn parse_statement<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Statement<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    if let Some(let_keyword) = next_if_matches!(lexemes, Token::LetKeyword)? {
        return parse_let_statement(arenas, lexemes, let_keyword);
    }
    if let Some(print_keyword) = next_if_matches!(lexemes, Token::PrintKeyword)? {
        return parse_print_statement(arenas, lexemes, print_keyword);
    }
    if let Some(if_keyword) = next_if_matches!(lexemes, Token::IfKeyword)? {
        return parse_if_statement(arenas, lexemes, if_keyword);
    }
    if let Some(while_keyword) = next_if_matches!(lexemes, Token::WhileKeyword)? {
        return parse_while_statement(arenas, lexemes, while_keyword);
    }
    if next_if_matches!(lexemes, Token::LeftCurlyBracket)?.is_some() {
        return Ok(Statement::Block{statements: parse_block(arenas, lexemes)?});
    }

    let expression = parse_expression(arenas, lexemes)?;
    expect(lexemes, Token::Semicolon)?;
    Ok(Statement::Expression{expression})
}

fn parse_let_statement<'a, I>(
    arenas: &Arenas<'a>,
    lexemes: &mut Peekable<I>,
    let_keyword: Location,
) -> Result<Statement<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let name = parse_identifier(lexemes)?;
    expect(lexemes, Token::Equals)?;
    let initializer = parse_expression(arenas, lexemes)?;
    expect(lexemes, Token::Semicolon)?;
    Ok(Statement::Let{let_keyword, name, initializer})
}

fn parse_print_statement<'a, I>(
    arenas: &Arenas<'a>,
    lexemes: &mut Peekable<I>,
    print_keyword: Location,
) -> Result<Statement<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let expression = parse_expression(arenas, lexemes)?;
    expect(lexemes, Token::Semicolon)?;
    Ok(Statement::Print{print_keyword, expression})
}

fn parse_if_statement<'a, I>(
    arenas: &Arenas<'a>,
    lexemes: &mut Peekable<I>,
    if_keyword: Location,
) -> Result<Statement<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let condition = parse_expression(arenas, lexemes)?;
    expect(lexemes, Token::LeftCurlyBracket)?;
    let then_branch = Box::new(Statement::Block{statements: parse_block(arenas, lexemes)?});

    let else_branch = if next_if_matches!(lexemes, Token::ElseKeyword)?.is_some() {
        if let Some(if_keyword) = next_if_matches!(lexemes, Token::IfKeyword)? {
            Some(Box::new(parse_if_statement(arenas, lexemes, if_keyword)?))
        } else {
            expect(lexemes, Token::LeftCurlyBracket)?;
            Some(Box::new(Statement::Block{statements: parse_block(arenas, lexemes)?}))
        }
    } else {
        None
    };

    Ok(Statement::If{if_keyword, condition, then_branch, else_branch})
}

fn parse_while_statement<'a, I>(
    arenas: &Arenas<'a>,
    lexemes: &mut Peekable<I>,
    while_keyword: Location,
) -> Result<Statement<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let condition = parse_expression(arenas, lexemes)?;
    expect(lexemes, Token::LeftCurlyBracket)?;
    let body = Box::new(Statement::Block{statements: parse_block(arenas, lexemes)?});
    Ok(Statement::While{while_keyword, condition, body})
}

/// Parse statements until `}`, which is consumed.
///
/// The opening `{` has already been consumed by the caller.
fn parse_block<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Vec<Statement<'a>>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let (statements, _right_brace) =
        many_until(lexemes, |lexemes| parse_statement(arenas, lexemes), Token::RightCurlyBracket)?;
    Ok(statements)
}

fn parse_identifier<'a>(lexemes: &mut impl Iterator<Item=lex::Result<Lexeme>>) -> Result<&'a str>
{
    let Lexeme{location, token} = next(lexemes)?;
    match token {
        // Leaked once per declaration; acceptable for a toy language with
        // no long-running compile sessions, and it lets the AST hand out
        // `&str` instead of threading an interner through every node.
        Token::Identifier(name) => Ok(Box::leak(name.into_boxed_str())),
        other                   => Err(Error::ExpectedIdentifier(location, other)),
    }
}

/* -------------------------------------------------------------------------- */
/*                                 Expressions                                */
/* -------------------------------------------------------------------------- */

/// Parse an expression.
///
/// Precedence, loosest to tightest: assignment, `or`, `and`, equality
/// (`==`/`!=`), comparison (`<`/`<=`/`>`/`>=`), additive (`+`/`-`),
/// multiplicative (`*`/`/`), unary (`-`/`not`), primary.
pub fn parse_expression<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    parse_assignment(arenas, lexemes)
}

fn parse_assignment<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let expression = parse_or(arenas, lexemes)?;

    if let Some(equals_location) = next_if_matches!(lexemes, Token::Equals)? {
        let name = match expression {
            Expression::Variable{name, ..} => name,
            _ => return Err(Error::ExpectedIdentifier(equals_location, Token::Equals)),
        };
        let value = arenas.alloc(parse_assignment(arenas, lexemes)?);
        return Ok(Expression::Assign{name, name_location: equals_location, value});
    }

    Ok(expression)
}

fn parse_or<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let parse_and = |lexemes: &mut Peekable<I>| parse_and(arenas, lexemes);
    left_associative!(arenas, lexemes, parse_and, match {
        Token::OrKeyword => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Or, operator_location, right},
    })
}

fn parse_and<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let parse_equality = |lexemes: &mut Peekable<I>| parse_equality(arenas, lexemes);
    left_associative!(arenas, lexemes, parse_equality, match {
        Token::AndKeyword => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::And, operator_location, right},
    })
}

fn parse_equality<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let parse_comparison = |lexemes: &mut Peekable<I>| parse_comparison(arenas, lexemes);
    left_associative!(arenas, lexemes, parse_comparison, match {
        Token::EqualsEquals => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Equal, operator_location, right},
        Token::BangEquals => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::NotEqual, operator_location, right},
    })
}

fn parse_comparison<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let parse_term = |lexemes: &mut Peekable<I>| parse_term(arenas, lexemes);
    left_associative!(arenas, lexemes, parse_term, match {
        Token::Less => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Less, operator_location, right},
        Token::LessEquals => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::LessEqual, operator_location, right},
        Token::Greater => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Greater, operator_location, right},
        Token::GreaterEquals => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::GreaterEqual, operator_location, right},
    })
}

fn parse_term<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let parse_factor = |lexemes: &mut Peekable<I>| parse_factor(arenas, lexemes);
    left_associative!(arenas, lexemes, parse_factor, match {
        Token::Plus => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Add, operator_location, right},
        Token::Minus => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Subtract, operator_location, right},
    })
}

fn parse_factor<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let parse_unary = |lexemes: &mut Peekable<I>| parse_unary(arenas, lexemes);
    left_associative!(arenas, lexemes, parse_unary, match {
        Token::Star => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Multiply, operator_location, right},
        Token::Slash => |left, operator_location, right|
            Expression::Binary{left, operator: BinaryOperator::Divide, operator_location, right},
    })
}

fn parse_unary<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    if let Some(operator_location) = next_if_matches!(lexemes, Token::Minus)? {
        let operand = arenas.alloc(parse_unary(arenas, lexemes)?);
        return Ok(Expression::Unary{operator: UnaryOperator::Negate, operator_location, operand});
    }
    if let Some(operator_location) = next_if_matches!(lexemes, Token::NotKeyword)? {
        let operand = arenas.alloc(parse_unary(arenas, lexemes)?);
        return Ok(Expression::Unary{operator: UnaryOperator::Not, operator_location, operand});
    }

    parse_primary(arenas, lexemes)
}

fn parse_primary<'a, I>(arenas: &Arenas<'a>, lexemes: &mut Peekable<I>) -> Result<Expression<'a>>
    where I: Iterator<Item=lex::Result<Lexeme>>
{
    let Lexeme{location, token} = next(lexemes)?;
    match token {
        Token::IntegerLiteral(value) => Ok(Expression::IntegerLiteral{location, value}),
        Token::TrueKeyword           => Ok(Expression::BooleanLiteral{location, value: true}),
        Token::FalseKeyword          => Ok(Expression::BooleanLiteral{location, value: false}),

        // Leaked once per occurrence; see the note in `parse_identifier`.
        Token::Identifier(name) => Ok(Expression::Variable{location, name: Box::leak(name.into_boxed_str())}),

        Token::LeftParenthesis => {
            let inner = parse_expression(arenas, lexemes)?;
            expect(lexemes, Token::RightParenthesis)?;
            Ok(inner)
        }

        other => Err(Error::ExpectedExpression(location, other)),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::syntax::lex::Lexer;

    fn parse_count(input: &str) -> usize
    {
        let mut lexemes = Lexer::new(input).peekable();
        Arenas::with(|arenas| parse_program(arenas, &mut lexemes)).unwrap().len()
    }

    #[test]
    fn let_and_print()
    {
        assert_eq!(parse_count("let x = 1 + 2; print x;"), 2);
    }

    #[test]
    fn if_else_chain()
    {
        assert_eq!(parse_count("if a { print 1; } else if b { print 2; } else { print 3; }"), 1);
    }

    #[test]
    fn while_loop()
    {
        assert_eq!(parse_count("while x < 10 { x = x + 1; }"), 1);
    }

    #[test]
    fn precedence_and_associativity()
    {
        let mut lexemes = Lexer::new("1 + 2 * 3 == 7 and not false;").peekable();
        Arenas::with(|arenas| {
            let statements = parse_program(arenas, &mut lexemes).unwrap();
            assert_eq!(statements.len(), 1);
            assert!(matches!(&statements[0], Statement::Expression{expression: Expression::Binary{..}}));
        });
    }

    #[test]
    fn unexpected_token_is_an_error()
    {
        let mut lexemes = Lexer::new("let = 1;").peekable();
        let result = Arenas::with(|arenas| parse_program(arenas, &mut lexemes).map(|_| ()));
        assert!(result.is_err());
    }
}
