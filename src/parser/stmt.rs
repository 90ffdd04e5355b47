//! Statement grammar productions.
//!
//! One function per non-terminal. Every production takes the current
//! innermost scope as an explicit parameter and returns the owned node it
//! built, so ownership flows upward through the recursion.

use crate::{
    ast::{
        ast::FunctionDefinition,
        expressions::{FunctionCall, OrExpr},
        scope::{ScopeId, VarId},
        statements::{Block, Stmt},
        value::Var,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{expr::parse_or_expr, parser::Parser};

/// `function := "fun" IDENT "(" [ IDENT { "," IDENT } ] ")" "{" block "}"`
///
/// The definition is registered into the program before the body is
/// parsed so that recursive self-calls resolve against the table.
pub fn parse_function(parser: &mut Parser) -> Result<(), Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    let name = name_token.value.clone();

    if parser.program.find_function(&name).is_some() {
        return Err(Error::new(
            ErrorImpl::FunctionAlreadyDeclared { function: name },
            name_token.span.start.clone(),
        ));
    }

    parser.expect(TokenKind::OpenParen)?;

    // Parameters live in the function's top-level scope, which has no
    // parent: functions do not close over anything.
    let scope = parser.program.scopes.alloc(None);
    let cells_start = parser.program.vars.len();
    let params = parse_params(parser, scope)?;

    let id = parser.program.add_function(FunctionDefinition {
        name,
        params,
        scope,
        body: Block {
            scope,
            body: vec![],
        },
        cells: cells_start..cells_start,
    });

    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_block(parser, scope)?;
    parser.program.set_function_body(id, body);

    Ok(())
}

/// Zero or more comma-separated parameter names, each declared as a
/// variable in the function's scope, followed by `)`.
fn parse_params(
    parser: &mut Parser,
    scope: ScopeId,
) -> Result<Vec<VarId>, Error> {
    let mut params = vec![];

    if parser.current_token_kind() == TokenKind::Identifier {
        let token = parser.advance().clone();
        params.push(declare_param(parser, scope, &token.value, token.span.start.clone())?);

        while parser.accept(TokenKind::Comma) {
            let token = parser.expect(TokenKind::Identifier)?;
            params.push(declare_param(parser, scope, &token.value, token.span.start.clone())?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}

fn declare_param(
    parser: &mut Parser,
    scope: ScopeId,
    name: &str,
    position: Position,
) -> Result<VarId, Error> {
    if parser.program.scopes.declared_here(scope, name) {
        return Err(Error::new(
            ErrorImpl::VariableAlreadyDeclared {
                variable: String::from(name),
            },
            position,
        ));
    }

    let var = parser.program.alloc_var(Var::Uninitialized);
    parser.program.scopes.declare(scope, name, var);
    Ok(var)
}

/// The statement dispatcher loop: `block := { statement }` up to the
/// closing `}`. Any unrecognized leading token is fatal, including EOF,
/// so an unterminated block cannot loop forever.
pub fn parse_block(parser: &mut Parser, scope: ScopeId) -> Result<Block, Error> {
    let mut body = vec![];

    while !parser.accept(TokenKind::CloseCurly) {
        let stmt = match parser.current_token_kind() {
            TokenKind::If => parse_if_stmt(parser, scope)?,
            TokenKind::While => parse_while_stmt(parser, scope)?,
            TokenKind::Identifier => parse_assign_or_call(parser, scope)?,
            TokenKind::Var => parse_var_decl(parser, scope)?,
            TokenKind::Return => parse_return_stmt(parser, scope)?,
            TokenKind::Continue => {
                parser.advance();
                parser.expect(TokenKind::Semicolon)?;
                Stmt::Continue
            }
            TokenKind::Break => {
                parser.advance();
                parser.expect(TokenKind::Semicolon)?;
                Stmt::Break
            }
            TokenKind::Append => parse_append_stmt(parser, scope)?,
            TokenKind::OpenCurly => {
                parser.advance();
                let inner = parser.program.scopes.alloc(Some(scope));
                Stmt::Block(parse_block(parser, inner)?)
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnknownStatement {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };
        body.push(stmt);
    }

    Ok(Block { scope, body })
}

/// `varStmt := "var" IDENT [ "=" orExpr ] ";"`
///
/// The name is declared before the initializer is parsed; without an
/// initializer the declaration carries a literal zero.
fn parse_var_decl(parser: &mut Parser, scope: ScopeId) -> Result<Stmt, Error> {
    parser.advance();
    let name_token = parser.expect(TokenKind::Identifier)?;
    let name = name_token.value.clone();

    if parser.program.scopes.declared_here(scope, &name) {
        return Err(Error::new(
            ErrorImpl::VariableAlreadyDeclared { variable: name },
            name_token.span.start.clone(),
        ));
    }

    let var = parser.program.alloc_var(Var::Uninitialized);
    parser.program.scopes.declare(scope, &name, var);

    let value = if parser.accept(TokenKind::Assignment) {
        parse_or_expr(parser, scope)?
    } else {
        OrExpr::literal(Var::Int(0))
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Declare { var, value })
}

/// Disambiguates an identifier-led statement by one token of lookahead:
/// a `(` makes it a call statement, anything else an assignment to an
/// existing variable.
fn parse_assign_or_call(parser: &mut Parser, scope: ScopeId) -> Result<Stmt, Error> {
    let name_token = parser.advance().clone();

    if parser.accept(TokenKind::OpenParen) {
        let call = parse_fun_call(
            parser,
            scope,
            &name_token.value,
            name_token.span.start.clone(),
        )?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Stmt::Call(call));
    }

    let target = parser
        .program
        .scopes
        .lookup(scope, &name_token.value)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name_token.value.clone(),
                },
                name_token.span.start.clone(),
            )
        })?;

    let index = if parser.accept(TokenKind::OpenBracket) {
        let expr = parse_or_expr(parser, scope)?;
        parser.expect(TokenKind::CloseBracket)?;
        Some(expr)
    } else {
        None
    };

    parser.expect(TokenKind::Assignment)?;
    let value = parse_or_expr(parser, scope)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Assign {
        target,
        index,
        value,
    })
}

/// Parses a call's argument list (the `(` is already consumed), resolves
/// the callee, and checks arity against the definition at parse time.
pub fn parse_fun_call(
    parser: &mut Parser,
    scope: ScopeId,
    name: &str,
    position: Position,
) -> Result<FunctionCall, Error> {
    let target = parser.program.find_function(name).ok_or_else(|| {
        Error::new(
            ErrorImpl::FunctionNotDeclared {
                function: String::from(name),
            },
            position.clone(),
        )
    })?;

    let mut arguments = vec![];
    if !parser.accept(TokenKind::CloseParen) {
        arguments.push(parse_or_expr(parser, scope)?);
        while !parser.accept(TokenKind::CloseParen) {
            parser.expect(TokenKind::Comma)?;
            arguments.push(parse_or_expr(parser, scope)?);
        }
    }

    let expected = parser.program.function(target).params.len();
    if expected != arguments.len() {
        return Err(Error::new(
            ErrorImpl::WrongNumberOfArguments {
                expected,
                received: arguments.len(),
            },
            position,
        ));
    }

    Ok(FunctionCall { target, arguments })
}

fn parse_return_stmt(parser: &mut Parser, scope: ScopeId) -> Result<Stmt, Error> {
    parser.advance();
    let value = parse_or_expr(parser, scope)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Return(value))
}

/// `ifStmt := "if" "(" orExpr ")" "{" block "}" [ "else" "{" block "}" ]`
fn parse_if_stmt(parser: &mut Parser, scope: ScopeId) -> Result<Stmt, Error> {
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_or_expr(parser, scope)?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;
    let then_scope = parser.program.scopes.alloc(Some(scope));
    let then_block = parse_block(parser, then_scope)?;

    let else_block = if parser.accept(TokenKind::Else) {
        parser.expect(TokenKind::OpenCurly)?;
        let else_scope = parser.program.scopes.alloc(Some(scope));
        Some(parse_block(parser, else_scope)?)
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_block,
        else_block,
    })
}

fn parse_while_stmt(parser: &mut Parser, scope: ScopeId) -> Result<Stmt, Error> {
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_or_expr(parser, scope)?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;
    let body_scope = parser.program.scopes.alloc(Some(scope));
    let body = parse_block(parser, body_scope)?;

    Ok(Stmt::While { condition, body })
}

/// `appendStmt := "append" "(" IDENT "," IDENT ")" ";"`. Both operands
/// must already be declared variables.
fn parse_append_stmt(parser: &mut Parser, scope: ScopeId) -> Result<Stmt, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let from_token = parser.expect(TokenKind::Identifier)?;
    let from = lookup_variable(parser, scope, &from_token.value, from_token.span.start.clone())?;

    parser.expect(TokenKind::Comma)?;

    let to_token = parser.expect(TokenKind::Identifier)?;
    let to = lookup_variable(parser, scope, &to_token.value, to_token.span.start.clone())?;

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Append { from, to })
}

pub fn lookup_variable(
    parser: &Parser,
    scope: ScopeId,
    name: &str,
    position: Position,
) -> Result<VarId, Error> {
    parser.program.scopes.lookup(scope, name).ok_or_else(|| {
        Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: String::from(name),
            },
            position,
        )
    })
}
