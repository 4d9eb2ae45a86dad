//! Lowering a parsed program to a bytecode [`Image`](crate::bytecode::Image).

pub use self::error::*;

mod error;

use crate::{
    bytecode::{Builder, Image, OpCode},
    syntax::ast::{BinaryOperator, Expression, Statement, UnaryOperator},
};

/// Compile a sequence of statements into a runnable image.
///
/// The whole program runs as one implicit top-level scope, so any
/// locals it declares are popped before the final `Return` just like a
/// nested block's locals are popped at `}`.
pub fn compile(statements: &[Statement]) -> Result<Image>
{
    let mut compiler = Compiler::new();
    compiler.begin_scope();
    for statement in statements {
        compiler.statement(statement)?;
    }
    compiler.end_scope();
    compiler.builder.emit(OpCode::Return);
    Ok(compiler.builder.finish())
}

struct Local<'a>
{
    name: &'a str,
}

struct Compiler<'a>
{
    builder: Builder,
    locals: Vec<Local<'a>>,
    /// Index in `locals` of the first local belonging to the
    /// innermost currently-open block, or `0` at the top level.
    scope_starts: Vec<usize>,
}

impl<'a> Compiler<'a>
{
    fn new() -> Self
    {
        Self{builder: Builder::new(), locals: Vec::new(), scope_starts: Vec::new()}
    }

    fn statement(&mut self, statement: &Statement<'a>) -> Result<()>
    {
        match statement {
            Statement::Expression{expression} => {
                self.expression(expression)?;
                self.builder.emit(OpCode::Pop);
            }

            Statement::Print{expression, ..} => {
                self.expression(expression)?;
                self.builder.emit(OpCode::Print);
            }

            Statement::Let{name, initializer, ..} => {
                self.expression(initializer)?;
                self.locals.push(Local{name});
            }

            Statement::Block{statements} => {
                self.begin_scope();
                for statement in statements {
                    self.statement(statement)?;
                }
                self.end_scope();
            }

            Statement::If{condition, then_branch, else_branch, ..} => {
                self.expression(condition)?;
                let else_jump = self.builder.emit_jump(OpCode::JumpIfFalse);
                self.builder.emit(OpCode::Pop);
                self.statement(then_branch)?;

                let end_jump = self.builder.emit_jump(OpCode::Jump);
                self.builder.patch_jump(else_jump);
                self.builder.emit(OpCode::Pop);

                if let Some(else_branch) = else_branch {
                    self.statement(else_branch)?;
                }
                self.builder.patch_jump(end_jump);
            }

            Statement::While{condition, body, ..} => {
                let head = self.builder.position();
                self.expression(condition)?;
                let exit_jump = self.builder.emit_jump(OpCode::JumpIfFalse);
                self.builder.emit(OpCode::Pop);
                self.statement(body)?;
                self.builder.emit_loop(head);
                self.builder.patch_jump(exit_jump);
                self.builder.emit(OpCode::Pop);
            }
        }
        Ok(())
    }

    fn expression(&mut self, expression: &Expression<'a>) -> Result<()>
    {
        match expression {
            Expression::IntegerLiteral{value, ..} => {
                let index = self.builder.constant(*value);
                self.builder.emit_u8(OpCode::Const, index);
            }

            Expression::BooleanLiteral{value, ..} => {
                self.builder.emit(if *value { OpCode::True } else { OpCode::False });
            }

            Expression::Variable{name, location} => {
                let slot = self.resolve_local(name).ok_or(Error::UndefinedVariable(*location, name.to_string()))?;
                self.builder.emit_u8(OpCode::GetLocal, slot);
            }

            Expression::Assign{name, name_location, value} => {
                self.expression(value)?;
                let slot = self.resolve_local(name)
                    .ok_or(Error::UndefinedVariable(*name_location, name.to_string()))?;
                self.builder.emit_u8(OpCode::SetLocal, slot);
            }

            Expression::Unary{operator, operand, ..} => {
                self.expression(operand)?;
                match operator {
                    UnaryOperator::Negate => self.builder.emit(OpCode::Negate),
                    UnaryOperator::Not    => self.builder.emit(OpCode::Not),
                }
            }

            Expression::Binary{left, operator: BinaryOperator::And, right, ..} => {
                self.expression(left)?;
                let short_circuit = self.builder.emit_jump(OpCode::JumpIfFalse);
                self.builder.emit(OpCode::Pop);
                self.expression(right)?;
                self.builder.patch_jump(short_circuit);
            }

            Expression::Binary{left, operator: BinaryOperator::Or, right, ..} => {
                self.expression(left)?;
                let else_jump = self.builder.emit_jump(OpCode::JumpIfFalse);
                let end_jump = self.builder.emit_jump(OpCode::Jump);
                self.builder.patch_jump(else_jump);
                self.builder.emit(OpCode::Pop);
                self.expression(right)?;
                self.builder.patch_jump(end_jump);
            }

            Expression::Binary{left, operator, right, ..} => {
                self.expression(left)?;
                self.expression(right)?;
                self.builder.emit(match operator {
                    BinaryOperator::Add          => OpCode::Add,
                    BinaryOperator::Subtract     => OpCode::Subtract,
                    BinaryOperator::Multiply     => OpCode::Multiply,
                    BinaryOperator::Divide       => OpCode::Divide,
                    BinaryOperator::Equal        => OpCode::Equal,
                    BinaryOperator::Greater      => OpCode::Greater,
                    BinaryOperator::Less         => OpCode::Less,
                    // `!=`, `<=`, `>=` have no dedicated opcode; they
                    // are the negation of one of the three above.
                    BinaryOperator::NotEqual     => { self.builder.emit(OpCode::Equal); OpCode::Not }
                    BinaryOperator::GreaterEqual => { self.builder.emit(OpCode::Less); OpCode::Not }
                    BinaryOperator::LessEqual    => { self.builder.emit(OpCode::Greater); OpCode::Not }
                    BinaryOperator::And | BinaryOperator::Or => unreachable!("handled above"),
                });
            }
        }
        Ok(())
    }

    fn begin_scope(&mut self)
    {
        self.scope_starts.push(self.locals.len());
    }

    fn end_scope(&mut self)
    {
        let start = self.scope_starts.pop().expect("end_scope without begin_scope");
        for _ in start..self.locals.len() {
            self.builder.emit(OpCode::Pop);
        }
        self.locals.truncate(start);
    }

    fn resolve_local(&self, name: &str) -> Option<u8>
    {
        self.locals.iter().rposition(|local| local.name == name).map(|i| i as u8)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::syntax::{lex::Lexer, parse::{parse_program, Arenas}};

    fn compile_source(source: &str) -> Image
    {
        let mut lexemes = Lexer::new(source).peekable();
        Arenas::with(|arenas| {
            let statements = parse_program(arenas, &mut lexemes).unwrap();
            compile(&statements).unwrap()
        })
    }

    #[test]
    fn literal_print_statement()
    {
        let image = compile_source("print 1 + 2;");
        assert_eq!(image.constants, vec![1, 2]);
        assert_eq!(
            image.code,
            vec![
                OpCode::Const as u8, 0,
                OpCode::Const as u8, 1,
                OpCode::Add as u8,
                OpCode::Print as u8,
                OpCode::Return as u8,
            ],
        );
    }

    #[test]
    fn let_binding_resolves_to_a_local_slot()
    {
        let image = compile_source("let x = 5; print x;");
        assert_eq!(
            image.code,
            vec![
                OpCode::Const as u8, 0,
                OpCode::GetLocal as u8, 0,
                OpCode::Print as u8,
                OpCode::Pop as u8,
                OpCode::Return as u8,
            ],
        );
    }

    #[test]
    fn undefined_variable_is_a_compile_error()
    {
        let mut lexemes = Lexer::new("print x;").peekable();
        let result = Arenas::with(|arenas| {
            let statements = parse_program(arenas, &mut lexemes).unwrap();
            compile(&statements)
        });
        assert!(matches!(result, Err(Error::UndefinedVariable(_, name)) if name == "x"));
    }

    #[test]
    fn while_loop_emits_a_backward_loop_instruction()
    {
        let image = compile_source("let x = 0; while x < 3 { x = x + 1; }");
        assert!(image.code.contains(&(OpCode::Loop as u8)));
    }

    #[test]
    fn block_scope_pops_its_locals_on_exit()
    {
        let image = compile_source("{ let x = 1; }");
        assert_eq!(
            image.code,
            vec![OpCode::Const as u8, 0, OpCode::Pop as u8, OpCode::Return as u8],
        );
    }
}
