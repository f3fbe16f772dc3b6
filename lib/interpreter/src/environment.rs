use std::{cell::RefCell, collections::HashMap, rc::Rc};

use errors::{Location, LoxError};
use scanner::Token;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("cannot get variable {0} which is not defined")]
    UndefinedGet(String),
    #[error("cannot set variable {0} which is not defined")]
    UndefinedSet(String),
}

/// One lexical scope: its own bindings plus a link to the scope it is nested in.
///
/// The link is only ever followed outward, so an inner scope sees (and can
/// mutate) outer bindings, while an outer scope never sees inner ones.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new_enclosed(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self { values: HashMap::new(), enclosing: Some(enclosing) }
    }

    /// Creates or overwrites a binding in this scope, shadowing any outer one.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, token: &Token) -> errors::Result<Value> {
        match (self.values.get(token.lexeme()), &self.enclosing) {
            (Some(value), _) => Ok(value.clone()),
            (None, Some(enclosing)) => enclosing.borrow().get(token),
            (None, None) => Err(Self::error(token, Error::UndefinedGet(token.lexeme().to_string()))),
        }
    }

    /// Updates the nearest existing binding, never creates one.
    pub fn assign(&mut self, token: &Token, value: Value) -> errors::Result<()> {
        if let Some(slot) = self.values.get_mut(token.lexeme()) {
            *slot = value;
            return Ok(());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(token, value),
            None => Err(Self::error(token, Error::UndefinedSet(token.lexeme().to_string()))),
        }
    }

    fn error(token: &Token, error: Error) -> LoxError {
        LoxError::new(token.line(), Location::Environment, error)
    }
}
