//! Formkit Expr - constrained formula language for derived fields
//!
//! Derived-field formulas are parsed into an expression tree over a fixed
//! grammar (arithmetic, comparison, identifiers, a small builtin function
//! set) and evaluated by a tree walker. No arbitrary code execution.
//!
//! # Example
//!
//! ```rust
//! use formkit_expr::{parse, eval, Value};
//! use std::collections::HashMap;
//!
//! let expr = parse("Number(a) + Number(b)").unwrap();
//! let mut scope = HashMap::new();
//! scope.insert("a".to_string(), Value::text("2"));
//! scope.insert("b".to_string(), Value::text("3"));
//!
//! assert_eq!(eval(&expr, &scope).unwrap(), Value::Number(5.0));
//! ```

#![warn(unreachable_pub)]

mod ast;
mod error;
mod eval;
mod parser;
mod value;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{EvalError, ParseError};
pub use eval::{eval, FnScope, Scope};
pub use parser::parse;
pub use value::Value;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
