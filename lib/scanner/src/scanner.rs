use cursor::Cursor;
use errors::{Location, LoxError};

pub mod token;
pub use token::{Keyword, Token, TokenData};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("failed to scan token '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated string")]
    UnterminatedString,
}

/// Single left-to-right pass over the source, producing the whole token list
/// or the first error encountered.
pub struct Scanner<'a> {
    start: Cursor<'a>,
    current: Cursor<'a>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { start: Cursor::new(source), current: Cursor::new(source), tokens: Vec::new() }
    }

    fn add_token(&mut self, data: TokenData<'a>) {
        self.tokens.push(Token::new(data, (self.start.clone(), self.current.clone())));
    }

    fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.current)
    }

    fn error(&self, error: ScanError) -> LoxError {
        LoxError::new(self.current.line(), Location::Scanner, error)
    }

    pub fn scan_tokens(mut self) -> errors::Result<Vec<Token<'a>>> {
        loop {
            self.start = self.current.clone();
            let Some(c) = self.current.next() else {
                break;
            };

            match c {
                '(' => self.add_token(LeftParen),
                ')' => self.add_token(RightParen),
                '{' => self.add_token(LeftBrace),
                '}' => self.add_token(RightBrace),
                ',' => self.add_token(Comma),
                '.' => self.add_token(Dot),
                '-' => self.add_token(Minus),
                '+' => self.add_token(Plus),
                ';' => self.add_token(Semicolon),
                '*' => self.add_token(Star),

                '!' => {
                    let data = if self.current.advance_if('=') { BangEqual } else { Bang };
                    self.add_token(data)
                }
                '=' => {
                    let data = if self.current.advance_if('=') { EqualEqual } else { Equal };
                    self.add_token(data)
                }
                '<' => {
                    let data = if self.current.advance_if('=') { LessEqual } else { Less };
                    self.add_token(data)
                }
                '>' => {
                    let data = if self.current.advance_if('=') { GreaterEqual } else { Greater };
                    self.add_token(data)
                }

                '/' => {
                    if self.current.advance_if('/') {
                        // Comment
                        self.current.advance_past(|c| c == '\n');
                    } else {
                        self.add_token(Slash)
                    }
                }

                // The cursor does the line counting for '\n'
                ' ' | '\r' | '\t' | '\n' => (),

                '"' => self.string()?,

                d if d.is_ascii_digit() => self.number(),

                a if a.is_ascii_alphabetic() || a == '_' => self.identifier(),

                c => return Err(self.error(ScanError::UnexpectedCharacter(c))),
            }
        }

        self.start = self.current.clone();
        self.add_token(Eof);

        log::debug!("Scanned {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    fn string(&mut self) -> errors::Result<()> {
        if !self.current.advance_past(|c| c == '"') {
            return Err(self.error(ScanError::UnterminatedString));
        }

        let lexeme = self.lexeme();
        self.add_token(Str(&lexeme[1..lexeme.len() - 1]));
        Ok(())
    }

    fn number(&mut self) {
        // Multiple dots are accepted here and end up as NaN
        self.current.advance_while(|c| c.is_ascii_digit() || c == '.');
        let value = self.lexeme().parse().unwrap_or(f64::NAN);
        self.add_token(Number(value));
    }

    fn identifier(&mut self) {
        self.current.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let data = self.lexeme().parse::<Keyword>().map_or(Identifier, TokenData::from);
        self.add_token(data);
    }
}

pub fn scan(source: &str) -> errors::Result<Vec<Token<'_>>> {
    Scanner::new(source).scan_tokens()
}

#[cfg(test)]
mod tests {
    use cursor::Line;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(source: &str) -> Vec<(TokenData<'_>, &str, usize)> {
        scan(source).unwrap().into_iter().map(|t| (t.data.clone(), t.lexeme(), t.line().0)).collect()
    }

    fn kinds(source: &str) -> Vec<TokenData<'_>> {
        scan(source).unwrap().into_iter().map(|t| t.data).collect()
    }

    #[test]
    fn string_literals() {
        assert_eq!(
            summary("\"hello world\""),
            vec![(Str("hello world"), "\"hello world\"", 1), (Eof, "", 1)]
        );

        // No escape processing, the line is the one the string started on
        assert_eq!(
            summary("\n\"a\\n\nb\" x"),
            vec![(Str("a\\n\nb"), "\"a\\n\nb\"", 2), (Identifier, "x", 3), (Eof, "", 3)]
        );

        assert_eq!(
            scan("\"hello world").unwrap_err(),
            LoxError::new(Line(1), Location::Scanner, ScanError::UnterminatedString)
        );
        assert_eq!(
            scan("\"hello\nworld\n").unwrap_err(),
            LoxError::new(Line(3), Location::Scanner, ScanError::UnterminatedString)
        );
    }

    #[test]
    fn two_char_tokens() {
        assert_eq!(
            summary("! != = == < <= > >="),
            vec![
                (Bang, "!", 1),
                (BangEqual, "!=", 1),
                (Equal, "=", 1),
                (EqualEqual, "==", 1),
                (Less, "<", 1),
                (LessEqual, "<=", 1),
                (Greater, ">", 1),
                (GreaterEqual, ">=", 1),
                (Eof, "", 1),
            ]
        );
    }

    #[test]
    fn single_char_tokens() {
        assert_eq!(
            kinds("=(){},.-+;*/!<>"),
            vec![
                Equal, LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus,
                Semicolon, Star, Slash, Bang, Less, Greater, Eof,
            ]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            summary("a // comment\nb"),
            vec![(Identifier, "a", 1), (Identifier, "b", 2), (Eof, "", 2)]
        );
        assert_eq!(summary("// only a comment"), vec![(Eof, "", 1)]);
        assert_eq!(kinds("1 / 2"), vec![Number(1.0), Slash, Number(2.0), Eof]);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            summary("123 4.5 6."),
            vec![(Number(123.0), "123", 1), (Number(4.5), "4.5", 1), (Number(6.0), "6.", 1), (Eof, "", 1)]
        );

        let tokens = scan("1.2.3").unwrap();
        assert_eq!(tokens[0].lexeme(), "1.2.3");
        assert!(matches!(tokens[0].data, Number(n) if n.is_nan()));
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("and class else false fun for if nil or print return super this true var while"),
            vec![
                And, Class, Else, False, Fun, For, If, Nil, Or, Print, Return, Super, This, True,
                Var, While, Eof,
            ]
        );

        assert_eq!(kinds("PRINT Var wHiLe"), vec![Print, Var, While, Eof]);

        assert_eq!(
            summary("foo _bar baz_9 printer"),
            vec![
                (Identifier, "foo", 1),
                (Identifier, "_bar", 1),
                (Identifier, "baz_9", 1),
                (Identifier, "printer", 1),
                (Eof, "", 1),
            ]
        );
    }

    #[test]
    fn lines() {
        let lines = scan("var a\r\n=\t1;\n\n{\n}").unwrap().iter().map(|t| t.line().0).collect_vec();
        assert_eq!(lines, vec![1, 1, 2, 2, 2, 4, 5, 5]);
    }

    #[test]
    fn unexpected_character() {
        assert_eq!(
            scan("var a = 1;\nprint @;").unwrap_err(),
            LoxError::new(Line(2), Location::Scanner, ScanError::UnexpectedCharacter('@'))
        );
        assert_eq!(
            scan("#").unwrap_err().to_string(),
            "[line 1] Error scanner: failed to scan token '#'"
        );
    }

    #[test]
    fn kind_display() {
        assert_eq!(Semicolon.to_string(), "';'");
        assert_eq!(Var.to_string(), "'var'");
        assert_eq!(Str("x").to_string(), "string");
        assert_eq!(Eof.to_string(), "end of file");
    }
}
