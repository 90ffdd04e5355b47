use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::WrongToken { .. } => "WrongToken",
            ErrorImpl::UnknownStatement { .. } => "UnknownStatement",
            ErrorImpl::UnknownExpression { .. } => "UnknownExpression",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::WrongNumberOfArguments { .. } => "WrongNumberOfArguments",
            ErrorImpl::EmptyVectorLiteral => "EmptyVectorLiteral",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::IntegerOverflow => "IntegerOverflow",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::WrongToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected `{}`, found `{}`, did you miss a token?",
                expected, found
            )),
            ErrorImpl::UnknownStatement { token } => ErrorTip::Suggestion(format!(
                "Token `{}` does not start a statement",
                token
            )),
            ErrorImpl::UnknownExpression { token } => ErrorTip::Suggestion(format!(
                "Token `{}` does not start an expression",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this scope",
                variable
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::WrongNumberOfArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::EmptyVectorLiteral => ErrorTip::Suggestion(String::from(
                "A vector literal needs at least one element",
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::IntegerOverflow => ErrorTip::Suggestion(String::from(
                "The result does not fit in a 64-bit integer",
            )),
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is out of bounds for a list of length {}",
                index, length
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected a value of type `{}`, received `{}`",
                expected, received
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("wrong token: expected {expected:?}, found {found:?}")]
    WrongToken { expected: String, found: String },
    #[error("token {token:?} does not start a statement")]
    UnknownStatement { token: String },
    #[error("token {token:?} does not start an expression")]
    UnknownExpression { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} not declared")]
    FunctionNotDeclared { function: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("wrong number of arguments: expected {expected:?}, received {received:?}")]
    WrongNumberOfArguments { expected: usize, received: usize },
    #[error("vector literal must not be empty")]
    EmptyVectorLiteral,
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("index {index:?} out of bounds for length {length:?}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
}
