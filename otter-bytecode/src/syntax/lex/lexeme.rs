use {super::super::location::Location, std::fmt};

/// Token along with its location.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub struct Lexeme
{
    pub location: Location,
    pub token: Token,
}

/// Structured information about a lexeme.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum Token
{
    IntegerLiteral(i32),
    Identifier(String),

    // Keywords.
    AndKeyword,
    ElseKeyword,
    FalseKeyword,
    IfKeyword,
    LetKeyword,
    NotKeyword,
    OrKeyword,
    PrintKeyword,
    TrueKeyword,
    WhileKeyword,

    // Punctuation.
    /** `+`  */ Plus,
    /** `-`  */ Minus,
    /** `*`  */ Star,
    /** `/`  */ Slash,
    /** `=`  */ Equals,
    /** `==` */ EqualsEquals,
    /** `!=` */ BangEquals,
    /** `<`  */ Less,
    /** `<=` */ LessEquals,
    /** `>`  */ Greater,
    /** `>=` */ GreaterEquals,
    /** `(`  */ LeftParenthesis,
    /** `)`  */ RightParenthesis,
    /** `{`  */ LeftCurlyBracket,
    /** `}`  */ RightCurlyBracket,
    /** `;`  */ Semicolon,
}

impl fmt::Display for Token
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self {
            Self::IntegerLiteral(value) => write!(f, "integer literal {value:?}"),
            Self::Identifier(name)      => write!(f, "identifier {name:?}"),
            Self::AndKeyword             => write!(f, "`and`"),
            Self::ElseKeyword            => write!(f, "`else`"),
            Self::FalseKeyword           => write!(f, "`false`"),
            Self::IfKeyword              => write!(f, "`if`"),
            Self::LetKeyword             => write!(f, "`let`"),
            Self::NotKeyword             => write!(f, "`not`"),
            Self::OrKeyword              => write!(f, "`or`"),
            Self::PrintKeyword           => write!(f, "`print`"),
            Self::TrueKeyword            => write!(f, "`true`"),
            Self::WhileKeyword           => write!(f, "`while`"),
            Self::Plus                   => write!(f, "`+`"),
            Self::Minus                  => write!(f, "`-`"),
            Self::Star                   => write!(f, "`*`"),
            Self::Slash                  => write!(f, "`/`"),
            Self::Equals                 => write!(f, "`=`"),
            Self::EqualsEquals           => write!(f, "`==`"),
            Self::BangEquals             => write!(f, "`!=`"),
            Self::Less                   => write!(f, "`<`"),
            Self::LessEquals             => write!(f, "`<=`"),
            Self::Greater                => write!(f, "`>`"),
            Self::GreaterEquals          => write!(f, "`>=`"),
            Self::LeftParenthesis        => write!(f, "`(`"),
            Self::RightParenthesis       => write!(f, "`)`"),
            Self::LeftCurlyBracket       => write!(f, "`{{`"),
            Self::RightCurlyBracket      => write!(f, "`}}`"),
            Self::Semicolon              => write!(f, "`;`"),
        }
    }
}

/// Look up the keyword token for `word`, if any.
pub fn keyword(word: &str) -> Option<Token>
{
    Some(match word {
        "and"   => Token::AndKeyword,
        "else"  => Token::ElseKeyword,
        "false" => Token::FalseKeyword,
        "if"    => Token::IfKeyword,
        "let"   => Token::LetKeyword,
        "not"   => Token::NotKeyword,
        "or"    => Token::OrKeyword,
        "print" => Token::PrintKeyword,
        "true"  => Token::TrueKeyword,
        "while" => Token::WhileKeyword,
        _       => return None,
    })
}
