//! Tree-walking evaluator.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::EvalError;
use crate::value::Value;
use std::collections::HashMap;

/// Name resolution for formula identifiers.
///
/// A preview session binds each of a derived field's parent ids to that
/// parent's current value.
pub trait Scope {
    /// Resolve an identifier to its current value
    fn resolve(&self, name: &str) -> Option<Value>;
}

impl Scope for HashMap<String, Value> {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Adapter turning a closure into a [`Scope`].
pub struct FnScope<F>(pub F);

impl<F> Scope for FnScope<F>
where
    F: Fn(&str) -> Option<Value>,
{
    fn resolve(&self, name: &str) -> Option<Value> {
        (self.0)(name)
    }
}

/// Evaluate an expression against a scope.
pub fn eval(expr: &Expr, scope: &impl Scope) -> Result<Value, EvalError> {
    eval_dyn(expr, scope)
}

fn eval_dyn(expr: &Expr, scope: &dyn ScopeDyn) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ident(name) => scope
            .resolve_dyn(name)
            .ok_or_else(|| EvalError::UnknownIdentifier(name.clone())),
        Expr::Unary { op, expr } => {
            let value = eval_dyn(expr, scope)?;
            apply_unary(*op, value)
        }
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval_dyn(lhs, scope)?;
            let rhs = eval_dyn(rhs, scope)?;
            apply_binary(*op, lhs, rhs)
        }
        Expr::Call { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_dyn(arg, scope)?);
            }
            call_builtin(name, values)
        }
    }
}

// Object-safe shim so the recursive walker is monomorphized once.
trait ScopeDyn {
    fn resolve_dyn(&self, name: &str) -> Option<Value>;
}

impl<S: Scope> ScopeDyn for S {
    fn resolve_dyn(&self, name: &str) -> Option<Value> {
        self.resolve(name)
    }
}

fn apply_unary(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Neg => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(EvalError::TypeMismatch { op: "-".to_string() }),
        },
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add => add(lhs, rhs),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            let (a, b) = numeric_operands(op, lhs, rhs)?;
            match op {
                BinaryOp::Sub => Ok(Value::Number(a - b)),
                BinaryOp::Mul => Ok(Value::Number(a * b)),
                BinaryOp::Div => {
                    if b == 0.0 {
                        Err(EvalError::DivisionByZero)
                    } else {
                        Ok(Value::Number(a / b))
                    }
                }
                BinaryOp::Rem => {
                    if b == 0.0 {
                        Err(EvalError::DivisionByZero)
                    } else {
                        Ok(Value::Number(a % b))
                    }
                }
                _ => unreachable!(),
            }
        }
        BinaryOp::Eq => Ok(Value::Bool(values_equal(&lhs, &rhs))),
        BinaryOp::Ne => Ok(Value::Bool(!values_equal(&lhs, &rhs))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(op, &lhs, &rhs)?;
            let ok = match op {
                BinaryOp::Lt => ordering == std::cmp::Ordering::Less,
                BinaryOp::Le => ordering != std::cmp::Ordering::Greater,
                BinaryOp::Gt => ordering == std::cmp::Ordering::Greater,
                BinaryOp::Ge => ordering != std::cmp::Ordering::Less,
                _ => unreachable!(),
            };
            Ok(Value::Bool(ok))
        }
    }
}

/// `+` adds numbers; when either side is text, it concatenates the display
/// renderings instead.
fn add(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Text(_), _) | (_, Value::Text(_)) => {
            Ok(Value::Text(format!("{lhs}{rhs}")))
        }
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        _ => Err(EvalError::TypeMismatch { op: "+".to_string() }),
    }
}

fn numeric_operands(op: BinaryOp, lhs: Value, rhs: Value) -> Result<(f64, f64), EvalError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        _ => Err(EvalError::TypeMismatch {
            op: op.symbol().to_string(),
        }),
    }
}

/// Structural equality; values of different kinds compare unequal.
fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Empty, Value::Empty) => true,
        _ => false,
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<std::cmp::Ordering, EvalError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a
            .partial_cmp(b)
            .ok_or(EvalError::TypeMismatch {
                op: op.symbol().to_string(),
            }),
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        _ => Err(EvalError::TypeMismatch {
            op: op.symbol().to_string(),
        }),
    }
}

fn call_builtin(name: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    match name {
        "Number" => {
            let [arg] = take_args::<1>(name, args)?;
            to_number(arg).map(Value::Number)
        }
        "Length" => {
            let [arg] = take_args::<1>(name, args)?;
            match arg {
                Value::Text(s) => Ok(Value::Number(s.chars().count() as f64)),
                Value::Empty => Ok(Value::Number(0.0)),
                _ => Err(EvalError::TypeMismatch {
                    op: "Length".to_string(),
                }),
            }
        }
        "Concat" => {
            let mut out = String::new();
            for arg in &args {
                out.push_str(&arg.to_string());
            }
            Ok(Value::Text(out))
        }
        "If" => {
            let [cond, then, otherwise] = take_args::<3>(name, args)?;
            if cond.is_truthy() {
                Ok(then)
            } else {
                Ok(otherwise)
            }
        }
        "Min" => {
            let [a, b] = take_args::<2>(name, args)?;
            let (a, b) = (to_number(a)?, to_number(b)?);
            Ok(Value::Number(a.min(b)))
        }
        "Max" => {
            let [a, b] = take_args::<2>(name, args)?;
            let (a, b) = (to_number(a)?, to_number(b)?);
            Ok(Value::Number(a.max(b)))
        }
        other => Err(EvalError::UnknownFunction(other.to_string())),
    }
}

fn take_args<const N: usize>(function: &str, args: Vec<Value>) -> Result<[Value; N], EvalError> {
    let got = args.len();
    args.try_into().map_err(|_| EvalError::Arity {
        function: function.to_string(),
        expected: N,
        got,
    })
}

/// Numeric coercion: empty is zero, booleans are 0/1, text must parse.
fn to_number(value: Value) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Empty => Ok(0.0),
        Value::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| EvalError::NotANumber(s))
        }
    }
}
