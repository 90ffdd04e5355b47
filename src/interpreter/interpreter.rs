use crate::{
    ast::{
        ast::{FunId, Program},
        expressions::{
            AddExpr, AddOp, AndExpr, BaseExpr, BaseKind, FunctionCall, LogicExpr, MultExpr,
            MultOp, OrExpr, RelExpr, RelOp,
        },
        scope::VarId,
        statements::{Block, Stmt},
        value::Var,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// How a statement finished: either fall through to the next one, or
/// unwind to the nearest loop (`Break`/`Continue`) or call (`Return`).
enum Flow {
    Normal,
    Break,
    Continue,
    Return(Var),
}

/// Executes the AST against the storage cells allocated at parse time.
///
/// The cells are cloned out of the program at startup, so one `Program`
/// can be run repeatedly from the same initial state. Each call saves the
/// callee's cell range and restores it on return, so a recursive call
/// cannot clobber the locals of the invocation that is still pending.
pub struct Interpreter<'a> {
    program: &'a Program,
    vars: Vec<Var>,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a Program) -> Self {
        Interpreter {
            program,
            vars: program.vars.clone(),
        }
    }

    /// Runs `main` (which must exist and take no parameters) and returns
    /// its result. A body that falls off the end yields integer zero.
    pub fn run(&mut self) -> Result<Var, Error> {
        let main = self.program.find_function("main").ok_or_else(|| {
            Error::new(
                ErrorImpl::FunctionNotDeclared {
                    function: String::from("main"),
                },
                Position::null(),
            )
        })?;

        let params = self.program.function(main).params.len();
        if params != 0 {
            return Err(Error::new(
                ErrorImpl::WrongNumberOfArguments {
                    expected: 0,
                    received: params,
                },
                Position::null(),
            ));
        }

        self.call(main, vec![])
    }

    fn call(&mut self, fun: FunId, args: Vec<Var>) -> Result<Var, Error> {
        let definition = self.program.function(fun);

        // Arguments were already evaluated in the caller's frame. Save
        // the callee's cells before writing them and restore on return:
        // when the callee is the caller itself (recursion), the pending
        // invocation must see its own locals again.
        let frame = definition.cells.clone();
        let saved = self.vars[frame.clone()].to_vec();

        for (param, value) in definition.params.iter().zip(args) {
            self.vars[param.0] = value;
        }

        let flow = self.exec_block(&definition.body)?;
        self.vars[frame].clone_from_slice(&saved);

        match flow {
            Flow::Return(value) => Ok(value),
            _ => Ok(Var::Int(0)),
        }
    }

    fn exec_block(&mut self, block: &Block) -> Result<Flow, Error> {
        for stmt in &block.body {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, Error> {
        match stmt {
            Stmt::Declare { var, value } => {
                let value = self.eval_or(value)?;
                self.vars[var.0] = value;
            }
            Stmt::Assign {
                target,
                index: None,
                value,
            } => {
                let value = self.eval_or(value)?;
                self.vars[target.0] = value;
            }
            Stmt::Assign {
                target,
                index: Some(index),
                value,
            } => {
                let index = self.eval_int(index)?;
                let value = self.eval_int(value)?;

                match &mut self.vars[target.0] {
                    Var::List(items) => {
                        if index < 0 || index as usize >= items.len() {
                            return Err(Error::new(
                                ErrorImpl::IndexOutOfBounds {
                                    index,
                                    length: items.len(),
                                },
                                Position::null(),
                            ));
                        }
                        items[index as usize] = value;
                    }
                    other => {
                        return Err(Error::new(
                            ErrorImpl::TypeMismatch {
                                expected: String::from("list"),
                                received: String::from(other.type_name()),
                            },
                            Position::null(),
                        ))
                    }
                }
            }
            Stmt::Call(call) => {
                self.eval_call(call)?;
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                if self.eval_or(condition)?.is_truthy() {
                    return self.exec_block(then_block);
                } else if let Some(else_block) = else_block {
                    return self.exec_block(else_block);
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_or(condition)?.is_truthy() {
                    match self.exec_block(body)? {
                        Flow::Normal | Flow::Continue => {}
                        Flow::Break => break,
                        Flow::Return(value) => return Ok(Flow::Return(value)),
                    }
                }
            }
            Stmt::Return(value) => {
                let value = self.eval_or(value)?;
                return Ok(Flow::Return(value));
            }
            Stmt::Break => return Ok(Flow::Break),
            Stmt::Continue => return Ok(Flow::Continue),
            Stmt::Append { from, to } => {
                let value = self.read_var(*from);

                let mut items = match self.vars[to.0].clone() {
                    Var::List(items) => items,
                    Var::Int(value) => vec![value],
                    Var::Uninitialized => vec![],
                };
                match value {
                    Var::List(mut more) => items.append(&mut more),
                    Var::Int(value) => items.push(value),
                    Var::Uninitialized => items.push(0),
                }
                self.vars[to.0] = Var::List(items);
            }
            Stmt::Block(block) => return self.exec_block(block),
        }

        Ok(Flow::Normal)
    }

    fn eval_call(&mut self, call: &FunctionCall) -> Result<Var, Error> {
        let mut args = vec![];
        for argument in &call.arguments {
            args.push(self.eval_or(argument)?);
        }
        self.call(call.target, args)
    }

    /// Reads a storage cell; an uninitialized cell reads as integer zero.
    fn read_var(&self, var: VarId) -> Var {
        match &self.vars[var.0] {
            Var::Uninitialized => Var::Int(0),
            other => other.clone(),
        }
    }

    fn eval_or(&mut self, expr: &OrExpr) -> Result<Var, Error> {
        let first = self.eval_and(&expr.first)?;
        if expr.rest.is_empty() {
            return Ok(first);
        }

        let mut result = first.is_truthy();
        for operand in &expr.rest {
            if result {
                break;
            }
            result = self.eval_and(operand)?.is_truthy();
        }
        Ok(Var::Int(result as i64))
    }

    fn eval_and(&mut self, expr: &AndExpr) -> Result<Var, Error> {
        let first = self.eval_rel(&expr.first)?;
        if expr.rest.is_empty() {
            return Ok(first);
        }

        let mut result = first.is_truthy();
        for operand in &expr.rest {
            if !result {
                break;
            }
            result = self.eval_rel(operand)?.is_truthy();
        }
        Ok(Var::Int(result as i64))
    }

    fn eval_rel(&mut self, expr: &RelExpr) -> Result<Var, Error> {
        let left = self.eval_logic(&expr.left)?;

        let (op, right) = match &expr.comparison {
            Some((op, right)) => (op, right),
            None => return Ok(left),
        };
        let right = self.eval_logic(right)?;

        let (a, b) = (expect_int(left)?, expect_int(right)?);
        let result = match op {
            RelOp::Equal => a == b,
            RelOp::NotEqual => a != b,
            RelOp::Less => a < b,
            RelOp::LessEqual => a <= b,
            RelOp::Greater => a > b,
            RelOp::GreaterEqual => a >= b,
        };
        Ok(Var::Int(result as i64))
    }

    fn eval_logic(&mut self, expr: &LogicExpr) -> Result<Var, Error> {
        let value = self.eval_add(&expr.operand)?;
        if expr.negated {
            Ok(Var::Int(!value.is_truthy() as i64))
        } else {
            Ok(value)
        }
    }

    fn eval_add(&mut self, expr: &AddExpr) -> Result<Var, Error> {
        let mut value = self.eval_mult(&expr.first)?;

        for (op, operand) in &expr.rest {
            let right = self.eval_mult(operand)?;
            value = match op {
                AddOp::Plus => arith(value, right, |a, b| checked(a.checked_add(b)), true)?,
                AddOp::Minus => arith(value, right, |a, b| checked(a.checked_sub(b)), false)?,
            };
        }

        Ok(value)
    }

    fn eval_mult(&mut self, expr: &MultExpr) -> Result<Var, Error> {
        let mut value = self.eval_base(&expr.first)?;

        for (op, operand) in &expr.rest {
            let right = self.eval_base(operand)?;
            value = match op {
                MultOp::Multiply => {
                    arith(value, right, |a, b| checked(a.checked_mul(b)), false)?
                }
                MultOp::Divide => arith(
                    value,
                    right,
                    |a, b| {
                        if b == 0 {
                            Err(Error::new(ErrorImpl::DivisionByZero, Position::null()))
                        } else {
                            checked(a.checked_div(b))
                        }
                    },
                    false,
                )?,
            };
        }

        Ok(value)
    }

    fn eval_base(&mut self, expr: &BaseExpr) -> Result<Var, Error> {
        let value = match &expr.kind {
            BaseKind::Literal(value) => value.clone(),
            BaseKind::Grouping(inner) => self.eval_or(inner)?,
            BaseKind::Len(var) => match &self.vars[var.0] {
                Var::List(items) => Var::Int(items.len() as i64),
                _ => Var::Int(1),
            },
            BaseKind::Call(call) => self.eval_call(call)?,
            BaseKind::Variable(var) => self.read_var(*var),
            BaseKind::Index { var, index } => {
                let index = self.eval_int(index)?;
                let items = self.expect_list(*var)?;

                if index < 0 || index as usize >= items.len() {
                    return Err(Error::new(
                        ErrorImpl::IndexOutOfBounds {
                            index,
                            length: items.len(),
                        },
                        Position::null(),
                    ));
                }
                Var::Int(items[index as usize])
            }
            BaseKind::Slice { var, from, to } => {
                let from = self.eval_int(from)?;
                let to = self.eval_int(to)?;
                let items = self.expect_list(*var)?;

                if from < 0 || to < from || to as usize > items.len() {
                    return Err(Error::new(
                        ErrorImpl::IndexOutOfBounds {
                            index: to,
                            length: items.len(),
                        },
                        Position::null(),
                    ));
                }
                Var::List(items[from as usize..to as usize].to_vec())
            }
        };

        if expr.negated {
            negate(value)
        } else {
            Ok(value)
        }
    }

    fn eval_int(&mut self, expr: &OrExpr) -> Result<i64, Error> {
        let value = self.eval_or(expr)?;
        expect_int(value)
    }

    fn expect_list(&self, var: VarId) -> Result<Vec<i64>, Error> {
        match &self.vars[var.0] {
            Var::List(items) => Ok(items.clone()),
            other => Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("list"),
                    received: String::from(other.type_name()),
                },
                Position::null(),
            )),
        }
    }
}

fn expect_int(value: Var) -> Result<i64, Error> {
    match value {
        Var::Uninitialized => Ok(0),
        Var::Int(value) => Ok(value),
        Var::List(_) => Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: String::from("int"),
                received: String::from("list"),
            },
            Position::null(),
        )),
    }
}

/// Maps an overflowed checked operation to a runtime error.
fn checked(result: Option<i64>) -> Result<i64, Error> {
    result.ok_or_else(|| Error::new(ErrorImpl::IntegerOverflow, Position::null()))
}

fn negate(value: Var) -> Result<Var, Error> {
    match value {
        Var::Uninitialized => Ok(Var::Int(0)),
        Var::Int(value) => Ok(Var::Int(checked(value.checked_neg())?)),
        Var::List(items) => {
            let mut result = vec![];
            for item in items {
                result.push(checked(item.checked_neg())?);
            }
            Ok(Var::List(result))
        }
    }
}

/// Applies an integer operation across value shapes: int op int directly,
/// list op int (and int op list) elementwise, and list + list as
/// concatenation when `concat` is set. Any other list pairing is a type
/// error.
fn arith(
    left: Var,
    right: Var,
    op: impl Fn(i64, i64) -> Result<i64, Error>,
    concat: bool,
) -> Result<Var, Error> {
    match (left, right) {
        (Var::List(mut a), Var::List(mut b)) if concat => {
            a.append(&mut b);
            Ok(Var::List(a))
        }
        (Var::List(_), Var::List(_)) => Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: String::from("int"),
                received: String::from("list"),
            },
            Position::null(),
        )),
        (Var::List(items), other) => {
            let b = expect_int(other)?;
            let mut result = vec![];
            for a in items {
                result.push(op(a, b)?);
            }
            Ok(Var::List(result))
        }
        (other, Var::List(items)) => {
            let a = expect_int(other)?;
            let mut result = vec![];
            for b in items {
                result.push(op(a, b)?);
            }
            Ok(Var::List(result))
        }
        (a, b) => Ok(Var::Int(op(expect_int(a)?, expect_int(b)?)?)),
    }
}
