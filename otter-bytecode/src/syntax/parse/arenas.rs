use {super::super::ast::Expression, typed_arena::Arena};

/// Arena [`Expression`] nodes are allocated in.
///
/// Statements nest through plain [`Box`] instead: unlike expressions,
/// which the precedence-climbing parser builds bottom-up and
/// re-references while folding operators, a statement is owned by
/// exactly one parent, so boxing it is simplest.
pub struct Arenas<'a>
{
    expressions: &'a Arena<Expression<'a>>,
}

impl<'a> Arenas<'a>
{
    /// Create an arena and pass it to the given function.
    pub fn with<R>(f: impl FnOnce(&Arenas) -> R) -> R
    {
        let expressions = &Arena::new();
        let arenas = Arenas{expressions};
        f(&arenas)
    }

    /// Move an expression to the arena.
    pub fn alloc(&self, expression: Expression<'a>) -> &'a mut Expression<'a>
    {
        self.expressions.alloc(expression)
    }
}
