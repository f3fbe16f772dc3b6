mod expr;
mod stmt;

use errors::{Location, LoxError};
pub use expr::{Expr, LiteralValue};
use scanner::{Token, TokenData};
pub use stmt::Stmt;

use TokenData::*;

type Result<T> = std::result::Result<T, LoxError>;

#[derive(Debug)]
pub struct ParserError<'a> {
    error: ParserErrorType,
    token: Token<'a>,
}

impl<'a> From<ParserError<'a>> for LoxError {
    fn from(ParserError { error, token }: ParserError<'a>) -> Self {
        let message = match error {
            ParserErrorType::InvalidAssignmentTarget => error.to_string(),
            _ => format!("{}, found {}", error, token.data),
        };
        LoxError::new(token.line(), Location::Parser, message)
    }
}

impl<'a> ParserError<'a> {
    fn new(error: ParserErrorType, token: Token<'a>) -> Self {
        Self { error, token }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    #[error("Expected '(' after '{0}'")]
    MissingLeftParen(&'static str),
    #[error("Expected ')' after {0}")]
    MissingRightParen(&'static str),
    #[error("Expected expression")]
    ExpectedExpression,
    #[error("Expected ';' after {0}")]
    ExpectedSemicolon(&'static str),
    #[error("Expected variable name")]
    ExpectedIdentifier,
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("Expected '}}' after block")]
    ExpectedRightBrace,
}

/// Recursive descent parser, one method per grammar rule.
///
/// There is no error recovery: the first error aborts the parse.
#[derive(Debug)]
pub struct Parser<'a, 't> {
    tokens: &'t [Token<'a>],
    current: usize,
}

impl<'a, 't> Parser<'a, 't> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn parse(mut self) -> Result<Vec<Stmt<'a>>> {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            let stmt = self.declaration()?;
            log::debug!("Parsed {}", stmt);
            stmts.push(stmt);
        }
        Ok(stmts)
    }

    fn declaration(&mut self) -> Result<Stmt<'a>> {
        if self.consume(Var).is_ok() {
            self.var_declaration()
        } else {
            self.statement()
        }
    }

    fn var_declaration(&mut self) -> Result<Stmt<'a>> {
        let name = self.consume_or_error(Identifier, ParserErrorType::ExpectedIdentifier)?;

        let initializer = match self.consume(Equal) {
            Ok(_) => Some(self.expression()?),
            Err(_) => None,
        };

        self.consume_or_error(
            Semicolon,
            ParserErrorType::ExpectedSemicolon("variable declaration"),
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt<'a>> {
        if self.consume(Print).is_ok() {
            return self.print_statement();
        }

        if self.consume(LeftBrace).is_ok() {
            return self.block();
        }

        if self.consume(If).is_ok() {
            return self.if_statement();
        }

        if self.consume(While).is_ok() {
            return self.while_statement();
        }

        self.expression_statement()
    }

    fn while_statement(&mut self) -> Result<Stmt<'a>> {
        self.consume_or_error(LeftParen, ParserErrorType::MissingLeftParen("while"))?;
        let condition = self.expression()?;
        self.consume_or_error(RightParen, ParserErrorType::MissingRightParen("condition"))?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn if_statement(&mut self) -> Result<Stmt<'a>> {
        self.consume_or_error(LeftParen, ParserErrorType::MissingLeftParen("if"))?;
        let condition = self.expression()?;
        self.consume_or_error(RightParen, ParserErrorType::MissingRightParen("condition"))?;

        let then_branch = Box::new(self.statement()?);

        let else_branch = match self.consume(Else) {
            Ok(_) => Some(Box::new(self.statement()?)),
            Err(_) => None,
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn block(&mut self) -> Result<Stmt<'a>> {
        let mut stmts = Vec::new();

        while !matches!(self.peek(), RightBrace | Eof) {
            stmts.push(self.declaration()?);
        }

        self.consume_or_error(RightBrace, ParserErrorType::ExpectedRightBrace)?;
        Ok(Stmt::Block(stmts))
    }

    fn print_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;
        self.consume_or_error(Semicolon, ParserErrorType::ExpectedSemicolon("value"))?;
        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;
        self.consume_or_error(Semicolon, ParserErrorType::ExpectedSemicolon("expression"))?;
        Ok(Stmt::Expression(value))
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr<'a>> {
        let expr = self.or()?;

        if let Ok(equal) = self.consume(Equal) {
            let value = Box::new(self.assignment()?);

            if let Expr::Variable(name) = expr {
                return Ok(Expr::Assign { name, value });
            }

            return Err(ParserError::new(ParserErrorType::InvalidAssignmentTarget, equal).into());
        }

        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.and()?;

        while let Ok(operator) = self.consume(Or) {
            let right = Box::new(self.and()?);
            expr = Expr::Logical { left: Box::new(expr), operator, right };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.equality()?;

        while let Ok(operator) = self.consume(And) {
            let right = Box::new(self.equality()?);
            expr = Expr::Logical { left: Box::new(expr), operator, right };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while let BangEqual | EqualEqual = self.peek() {
            let operator = self.advance();
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.term()?;

        while let Greater | GreaterEqual | Less | LessEqual = self.peek() {
            let operator = self.advance();
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.factor()?;

        while let Plus | Minus = self.peek() {
            let operator = self.advance();
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.unary()?;

        while let Star | Slash = self.peek() {
            let operator = self.advance();
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if let Minus | Bang = self.peek() {
            let operator = self.advance();
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let token = self.advance();
        match token.data {
            False => Ok(Expr::Literal(LiteralValue::Boolean(false))),
            True => Ok(Expr::Literal(LiteralValue::Boolean(true))),
            Str(s) => Ok(Expr::Literal(LiteralValue::Str(s))),
            Number(n) => Ok(Expr::Literal(LiteralValue::Number(n))),
            Nil => Ok(Expr::Literal(LiteralValue::Nil)),
            LeftParen => {
                let expr = self.expression()?;

                self.consume_or_error(RightParen, ParserErrorType::MissingRightParen("expression"))?;

                Ok(Expr::Grouping(Box::new(expr)))
            }
            Identifier => Ok(Expr::Variable(token)),

            _ => Err(ParserError::new(ParserErrorType::ExpectedExpression, token).into()),
        }
    }

    /// Advances past the next token if it has the given kind, otherwise hands
    /// back the token that was found instead.
    fn consume(&mut self, kind: TokenData) -> std::result::Result<Token<'a>, Token<'a>> {
        debug_assert!(!matches!(kind, Number(_) | Str(_)));
        if self.peek() == &kind {
            Ok(self.advance())
        } else {
            Err(self.peek_token().clone())
        }
    }

    fn consume_or_error(&mut self, kind: TokenData, error_type: ParserErrorType) -> Result<Token<'a>> {
        self.consume(kind).map_err(|token| ParserError::new(error_type, token).into())
    }
}

// Helpers
impl<'a, 't> Parser<'a, 't> {
    /// Callers must have checked `is_at_end` first, so there is at least one token.
    /// The cursor never moves past the final token.
    fn peek_token(&self) -> &'t Token<'a> {
        let tokens = self.tokens;
        &tokens[self.current.min(tokens.len() - 1)]
    }

    fn peek(&self) -> &'t TokenData<'a> {
        &self.peek_token().data
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek_token().clone();
        if token.data != Eof {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        matches!(self.tokens.get(self.current).map(|t| &t.data), None | Some(Eof))
    }
}

pub fn parse<'a>(tokens: &[Token<'a>]) -> Result<Vec<Stmt<'a>>> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use cursor::Line;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse_source(source: &str) -> Result<String> {
        let tokens = scanner::scan(source)?;
        Ok(parse(&tokens)?.iter().join("\n"))
    }

    fn parse_error(source: &str) -> String {
        parse_source(source).unwrap_err().to_string()
    }

    #[test]
    fn precedence() {
        assert_eq!(parse_source("1 + 2 * 3;").unwrap(), "(; (+ 1 (* 2 3)))");
        assert_eq!(parse_source("(1 + 2) * 3;").unwrap(), "(; (* (group (+ 1 2)) 3))");
        assert_eq!(parse_source("1 < 2 == 3 >= 4;").unwrap(), "(; (== (< 1 2) (>= 3 4)))");
        assert_eq!(parse_source("a or b and c;").unwrap(), "(; (or a (and b c)))");
        assert_eq!(parse_source("-a * !b;").unwrap(), "(; (* (- a) (! b)))");
        assert_eq!(parse_source("!!true;").unwrap(), "(; (! (! true)))");
    }

    #[test]
    fn associativity() {
        assert_eq!(parse_source("10 - 2 - 3;").unwrap(), "(; (- (- 10 2) 3))");
        assert_eq!(parse_source("8 / 4 / 2;").unwrap(), "(; (/ (/ 8 4) 2))");
        assert_eq!(parse_source("a or b or c;").unwrap(), "(; (or (or a b) c))");
        assert_eq!(parse_source("a = b = 5;").unwrap(), "(; (assign a (assign b 5)))");
    }

    #[test]
    fn statements() {
        assert_eq!(
            parse_source("var x; var y = \"s\";\nif (x) print 1; else { print nil; }\nwhile (y) y = false;")
                .unwrap(),
            [
                "(var x)",
                "(var y \"s\")",
                "(if x (print 1) (block (print nil)))",
                "(while y (; (assign y false)))",
            ]
            .join("\n")
        );
        assert_eq!(parse_source("if (a) if (b) print 1; else print 2;").unwrap(), "(if a (if b (print 1) (print 2)))");
        assert_eq!(parse_source("{}").unwrap(), "(block )");
        assert_eq!(parse_source("").unwrap(), "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let tokens = scanner::scan("var i = 0; while (i < 3) { print i; i = i + 1; }").unwrap();
        let first = parse(&tokens).unwrap();
        let second = parse(&tokens).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn missing_semicolon() {
        assert_eq!(
            parse_source("print 1").unwrap_err(),
            LoxError {
                line: Line(1),
                location: Location::Parser,
                message: "Expected ';' after value, found end of file".to_string(),
            }
        );
        assert_eq!(
            parse_error("var a = 1 var b = 2;"),
            "[line 1] Error parser: Expected ';' after variable declaration, found 'var'"
        );
        assert_eq!(
            parse_error("a\n+ b\nc;"),
            "[line 3] Error parser: Expected ';' after expression, found identifier"
        );
    }

    #[test]
    fn invalid_assignment_target() {
        assert_eq!(
            parse_error("var a;\n1 + a\n= 3;"),
            "[line 3] Error parser: Invalid assignment target"
        );
        assert_eq!(parse_error("(a) = 3;"), "[line 1] Error parser: Invalid assignment target");
    }

    #[test]
    fn unexpected_tokens() {
        assert_eq!(parse_error("print;"), "[line 1] Error parser: Expected expression, found ';'");
        assert_eq!(
            parse_error("for (;;) {}"),
            "[line 1] Error parser: Expected expression, found 'for'"
        );
        assert_eq!(
            parse_error("var 1 = 2;"),
            "[line 1] Error parser: Expected variable name, found number"
        );
        assert_eq!(
            parse_error("if 1) print 1;"),
            "[line 1] Error parser: Expected '(' after 'if', found number"
        );
        assert_eq!(
            parse_error("while (true print 1;"),
            "[line 1] Error parser: Expected ')' after condition, found 'print'"
        );
        assert_eq!(
            parse_error("print (1 + 2;"),
            "[line 1] Error parser: Expected ')' after expression, found ';'"
        );
        assert_eq!(
            parse_error("{\nprint 1;\n"),
            "[line 3] Error parser: Expected '}' after block, found end of file"
        );
    }

    #[test]
    fn first_error_aborts() {
        assert_eq!(
            parse_error("print 1 print 2\nprint;"),
            "[line 1] Error parser: Expected ';' after value, found 'print'"
        );
    }
}
