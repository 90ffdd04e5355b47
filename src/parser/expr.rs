//! Expression precedence chain.
//!
//! Classic precedence climbing, one function per level, lowest first.
//! Each level parses one operand at the next-higher level and then
//! loop-consumes its own operators, so left-to-right associativity falls
//! out of the loop order. The relational level is the exception: it
//! consumes at most one comparison and returns.

use crate::{
    ast::{
        expressions::{
            AddExpr, AddOp, AndExpr, BaseExpr, BaseKind, LogicExpr, MultExpr, MultOp, OrExpr,
            RelExpr, RelOp,
        },
        scope::ScopeId,
        value::Var,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    parser::Parser,
    stmt::{lookup_variable, parse_fun_call},
};

/// `orExpr := andExpr { "||" andExpr }`
pub fn parse_or_expr(parser: &mut Parser, scope: ScopeId) -> Result<OrExpr, Error> {
    let first = parse_and_expr(parser, scope)?;
    let mut rest = vec![];

    while parser.accept(TokenKind::Or) {
        rest.push(parse_and_expr(parser, scope)?);
    }

    Ok(OrExpr { first, rest })
}

/// `andExpr := relExpr { "&&" relExpr }`
fn parse_and_expr(parser: &mut Parser, scope: ScopeId) -> Result<AndExpr, Error> {
    let first = parse_rel_expr(parser, scope)?;
    let mut rest = vec![];

    while parser.accept(TokenKind::And) {
        rest.push(parse_rel_expr(parser, scope)?);
    }

    Ok(AndExpr { first, rest })
}

/// `relExpr := logicExpr [ relOp logicExpr ]`
///
/// Deliberately consumes at most one comparison operator: `a < b < c` is
/// not a chained comparison here, the trailing `< c` is left for the
/// enclosing production to reject.
fn parse_rel_expr(parser: &mut Parser, scope: ScopeId) -> Result<RelExpr, Error> {
    let left = parse_logic_expr(parser, scope)?;

    let op = match parser.current_token_kind() {
        TokenKind::Equals => Some(RelOp::Equal),
        TokenKind::NotEquals => Some(RelOp::NotEqual),
        TokenKind::Less => Some(RelOp::Less),
        TokenKind::LessEquals => Some(RelOp::LessEqual),
        TokenKind::Greater => Some(RelOp::Greater),
        TokenKind::GreaterEquals => Some(RelOp::GreaterEqual),
        _ => None,
    };

    let comparison = match op {
        Some(op) => {
            parser.advance();
            Some((op, parse_logic_expr(parser, scope)?))
        }
        None => None,
    };

    Ok(RelExpr { left, comparison })
}

/// `logicExpr := [ "!" ] addExpr`
fn parse_logic_expr(parser: &mut Parser, scope: ScopeId) -> Result<LogicExpr, Error> {
    let negated = parser.accept(TokenKind::Not);
    let operand = parse_add_expr(parser, scope)?;
    Ok(LogicExpr { negated, operand })
}

/// `addExpr := multExpr { ("+" | "-") multExpr }`
fn parse_add_expr(parser: &mut Parser, scope: ScopeId) -> Result<AddExpr, Error> {
    let first = parse_mult_expr(parser, scope)?;
    let mut rest = vec![];

    loop {
        let op = match parser.current_token_kind() {
            TokenKind::Plus => AddOp::Plus,
            TokenKind::Dash => AddOp::Minus,
            _ => break,
        };
        parser.advance();
        rest.push((op, parse_mult_expr(parser, scope)?));
    }

    Ok(AddExpr { first, rest })
}

/// `multExpr := baseExpr { ("*" | "/") baseExpr }`
fn parse_mult_expr(parser: &mut Parser, scope: ScopeId) -> Result<MultExpr, Error> {
    let first = parse_base_expr(parser, scope)?;
    let mut rest = vec![];

    loop {
        let op = match parser.current_token_kind() {
            TokenKind::Star => MultOp::Multiply,
            TokenKind::Slash => MultOp::Divide,
            _ => break,
        };
        parser.advance();
        rest.push((op, parse_base_expr(parser, scope)?));
    }

    Ok(MultExpr { first, rest })
}

/// The base term: literal, vector literal, parenthesized expression,
/// `len(x)`, call, or a (possibly indexed or sliced) identifier. A
/// leading unary minus is accepted at this level only.
fn parse_base_expr(parser: &mut Parser, scope: ScopeId) -> Result<BaseExpr, Error> {
    let negated = parser.accept(TokenKind::Dash);

    let kind = if parser.current_token_kind() == TokenKind::Number {
        let token = parser.advance().clone();
        BaseKind::Literal(Var::Int(parse_integer(&token)?))
    } else if parser.accept(TokenKind::OpenBracket) {
        BaseKind::Literal(parse_vector_literal(parser)?)
    } else if parser.accept(TokenKind::OpenParen) {
        let expr = parse_or_expr(parser, scope)?;
        parser.expect(TokenKind::CloseParen)?;
        BaseKind::Grouping(Box::new(expr))
    } else if parser.accept(TokenKind::Len) {
        parser.expect(TokenKind::OpenParen)?;
        let token = parser.expect(TokenKind::Identifier)?;
        let var = lookup_variable(parser, scope, &token.value, token.span.start.clone())?;
        parser.expect(TokenKind::CloseParen)?;
        BaseKind::Len(var)
    } else if parser.current_token_kind() == TokenKind::Identifier {
        let token = parser.advance().clone();

        if parser.accept(TokenKind::OpenParen) {
            BaseKind::Call(parse_fun_call(
                parser,
                scope,
                &token.value,
                token.span.start.clone(),
            )?)
        } else {
            let var = lookup_variable(parser, scope, &token.value, token.span.start.clone())?;

            if parser.accept(TokenKind::OpenBracket) {
                let index = parse_or_expr(parser, scope)?;
                let kind = if parser.accept(TokenKind::Colon) {
                    let to = parse_or_expr(parser, scope)?;
                    BaseKind::Slice {
                        var,
                        from: Box::new(index),
                        to: Box::new(to),
                    }
                } else {
                    BaseKind::Index {
                        var,
                        index: Box::new(index),
                    }
                };
                parser.expect(TokenKind::CloseBracket)?;
                kind
            } else {
                BaseKind::Variable(var)
            }
        }
    } else {
        return Err(Error::new(
            ErrorImpl::UnknownExpression {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    Ok(BaseExpr { negated, kind })
}

/// `"[" NUMBER { "," NUMBER } "]"`. Element expressions are restricted
/// to integer literals, and at least one element is required.
fn parse_vector_literal(parser: &mut Parser) -> Result<Var, Error> {
    if parser.current_token_kind() == TokenKind::CloseBracket {
        return Err(Error::new(
            ErrorImpl::EmptyVectorLiteral,
            parser.get_position(),
        ));
    }

    let mut items = vec![];

    let token = parser.expect(TokenKind::Number)?;
    items.push(parse_integer(&token)?);

    while parser.accept(TokenKind::Comma) {
        let token = parser.expect(TokenKind::Number)?;
        items.push(parse_integer(&token)?);
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Var::List(items))
}

fn parse_integer(token: &Token) -> Result<i64, Error> {
    token.value.parse().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    })
}
