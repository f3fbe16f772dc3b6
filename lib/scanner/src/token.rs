use std::fmt::Display;

use cursor::{Line, SourceRange};

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub data: TokenData<'a>,
    pub range: SourceRange<'a>,
}

impl<'a> Token<'a> {
    pub fn new(data: TokenData<'a>, range: impl Into<SourceRange<'a>>) -> Token<'a> {
        Self { data, range: range.into() }
    }

    pub fn lexeme(&self) -> &'a str {
        self.range.lexeme()
    }

    pub fn line(&self) -> Line {
        self.range.line()
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

/// Token kind, with the literal payload for strings and numbers.
///
/// The `Display` rendering is the human-readable kind used in parser messages.
#[derive(Debug, Clone, PartialEq, strum::Display)]
pub enum TokenData<'a> {
    // Single-character tokens.
    #[strum(serialize = "'('")]
    LeftParen,
    #[strum(serialize = "')'")]
    RightParen,
    #[strum(serialize = "'{'")]
    LeftBrace,
    #[strum(serialize = "'}'")]
    RightBrace,
    #[strum(serialize = "','")]
    Comma,
    #[strum(serialize = "'.'")]
    Dot,
    #[strum(serialize = "'-'")]
    Minus,
    #[strum(serialize = "'+'")]
    Plus,
    #[strum(serialize = "';'")]
    Semicolon,
    #[strum(serialize = "'/'")]
    Slash,
    #[strum(serialize = "'*'")]
    Star,

    // One or two character tokens.
    #[strum(serialize = "'!'")]
    Bang,
    #[strum(serialize = "'!='")]
    BangEqual,
    #[strum(serialize = "'='")]
    Equal,
    #[strum(serialize = "'=='")]
    EqualEqual,
    #[strum(serialize = "'>'")]
    Greater,
    #[strum(serialize = "'>='")]
    GreaterEqual,
    #[strum(serialize = "'<'")]
    Less,
    #[strum(serialize = "'<='")]
    LessEqual,

    // Literals.
    #[strum(serialize = "identifier")]
    Identifier,
    /// Raw content between the quotes, no escape processing.
    #[strum(serialize = "string")]
    Str(&'a str),
    #[strum(serialize = "number")]
    Number(f64),

    // Keywords.
    #[strum(serialize = "'and'")]
    And,
    #[strum(serialize = "'class'")]
    Class,
    #[strum(serialize = "'else'")]
    Else,
    #[strum(serialize = "'false'")]
    False,
    #[strum(serialize = "'fun'")]
    Fun,
    #[strum(serialize = "'for'")]
    For,
    #[strum(serialize = "'if'")]
    If,
    #[strum(serialize = "'nil'")]
    Nil,
    #[strum(serialize = "'or'")]
    Or,
    #[strum(serialize = "'print'")]
    Print,
    #[strum(serialize = "'return'")]
    Return,
    #[strum(serialize = "'super'")]
    Super,
    #[strum(serialize = "'this'")]
    This,
    #[strum(serialize = "'true'")]
    True,
    #[strum(serialize = "'var'")]
    Var,
    #[strum(serialize = "'while'")]
    While,

    #[strum(serialize = "end of file")]
    Eof,
}

/// Reserved words, matched without regard to ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Keyword {
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
}

impl From<Keyword> for TokenData<'_> {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::And => TokenData::And,
            Keyword::Class => TokenData::Class,
            Keyword::Else => TokenData::Else,
            Keyword::False => TokenData::False,
            Keyword::Fun => TokenData::Fun,
            Keyword::For => TokenData::For,
            Keyword::If => TokenData::If,
            Keyword::Nil => TokenData::Nil,
            Keyword::Or => TokenData::Or,
            Keyword::Print => TokenData::Print,
            Keyword::Return => TokenData::Return,
            Keyword::Super => TokenData::Super,
            Keyword::This => TokenData::This,
            Keyword::True => TokenData::True,
            Keyword::Var => TokenData::Var,
            Keyword::While => TokenData::While,
        }
    }
}
