use std::{cell::RefCell, io::Write, rc::Rc};

use errors::{Location, LoxError};
use parser::{Expr, LiteralValue, Stmt};
use scanner::{Token, TokenData};

mod value;
pub use value::{NativeFunction, Value};

mod environment;
pub use environment::Environment;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Operand of '-' must be a number, got {0}")]
    NegateNonNumber(&'static str),
    #[error("Operands of '{0}' must be numbers, got {1} and {2}")]
    NonNumberOperands(String, &'static str, &'static str),
    #[error("Operands of '+' must be two numbers or two strings, got {0} and {1}")]
    InvalidAddition(&'static str, &'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    /// Scanning or parsing failed, nothing was executed.
    #[error(transparent)]
    CompileError(LoxError),
    /// Execution stopped at the failing statement.
    #[error(transparent)]
    RuntimeError(LoxError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InterpretError>;

fn runtime_error(token: &Token, error: Error) -> InterpretError {
    InterpretError::RuntimeError(LoxError::new(token.line(), Location::Interpreter, error))
}

#[derive(Debug)]
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("clock", Value::NativeFunction(NativeFunction::clock()));
        Self::with_globals(globals)
    }

    pub fn with_globals(globals: Rc<RefCell<Environment>>) -> Self {
        Self { environment: globals.clone(), globals }
    }

    pub fn globals(&self) -> &Rc<RefCell<Environment>> {
        &self.globals
    }

    /// Scans, parses and executes `source`. Globals persist between calls.
    pub fn run_source(&mut self, source: &str, output: &mut impl Write) -> Result<()> {
        let tokens = scanner::scan(source).map_err(InterpretError::CompileError)?;
        let stmts = parser::parse(&tokens).map_err(InterpretError::CompileError)?;
        self.interpret(&stmts, output)
    }

    pub fn interpret(&mut self, stmts: &[Stmt], output: &mut impl Write) -> Result<()> {
        for s in stmts {
            self.execute(s, output)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt, output: &mut dyn Write) -> Result<()> {
        log::trace!("Executing {}", stmt);

        match stmt {
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(output, "{}", value)?;
            }
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name.lexeme(), value);
            }
            Stmt::Block(stmts) => {
                let scope = Environment::new_enclosed(self.environment.clone());
                self.execute_block(stmts, scope, output)?;
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch, output)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, output)?;
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body, output)?;
                }
            }
        }
        Ok(())
    }

    /// Runs `stmts` with `scope` as the current environment, restoring the
    /// previous one afterwards even if a statement fails.
    fn execute_block(
        &mut self,
        stmts: &[Stmt],
        scope: Environment,
        output: &mut dyn Write,
    ) -> Result<()> {
        log::trace!("Entering scope");
        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(scope)));

        let result = stmts.iter().try_for_each(|stmt| self.execute(stmt, output));

        self.environment = previous;
        log::trace!("Leaving scope");
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(LiteralValue::Number(n)) => Ok((*n).into()),
            Expr::Literal(LiteralValue::Str(s)) => Ok((*s).into()),
            Expr::Literal(LiteralValue::Boolean(b)) => Ok((*b).into()),
            Expr::Literal(LiteralValue::Nil) => Ok(Value::Nil),

            Expr::Grouping(expr) => self.evaluate(expr),

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                match (&operator.data, right) {
                    (TokenData::Minus, Value::Number(n)) => Ok((-n).into()),
                    (TokenData::Minus, v) => {
                        Err(runtime_error(operator, Error::NegateNonNumber(v.type_name())))
                    }
                    (TokenData::Bang, v) => Ok((!v.is_truthy()).into()),
                    _ => unreachable!("Invalid unary operator {}", operator),
                }
            }

            Expr::Variable(token) => {
                self.environment.borrow().get(token).map_err(InterpretError::RuntimeError)
            }

            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment
                    .borrow_mut()
                    .assign(name, value.clone())
                    .map_err(InterpretError::RuntimeError)?;
                Ok(value)
            }

            Expr::Logical { left, operator, right } => {
                let left = self.evaluate(left)?;
                let short_circuits = match operator.data {
                    TokenData::Or => left.is_truthy(),
                    TokenData::And => !left.is_truthy(),
                    _ => unreachable!("Invalid logical operator {}", operator),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(operator, left, right)
            }
        }
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value> {
    use TokenData::*;

    match (&left, &right, &operator.data) {
        (_, _, EqualEqual) => Ok((left == right).into()),
        (_, _, BangEqual) => Ok((left != right).into()),

        (Value::Number(l), Value::Number(r), op) => match op {
            Minus => Ok((l - r).into()),
            Slash => Ok((l / r).into()),
            Star => Ok((l * r).into()),
            Plus => Ok((l + r).into()),
            Greater => Ok((l > r).into()),
            GreaterEqual => Ok((l >= r).into()),
            Less => Ok((l < r).into()),
            LessEqual => Ok((l <= r).into()),
            _ => unreachable!("Invalid binary operator {}", operator),
        },

        (Value::Str(l), Value::Str(r), Plus) => Ok(format!("{l}{r}").into()),
        (_, _, Plus) => {
            Err(runtime_error(operator, Error::InvalidAddition(left.type_name(), right.type_name())))
        }

        _ => Err(runtime_error(
            operator,
            Error::NonNumberOperands(operator.lexeme().to_string(), left.type_name(), right.type_name()),
        )),
    }
}
