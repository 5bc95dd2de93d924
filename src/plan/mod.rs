//! Logical SQL fragments (noun module)
//!
//! Typed pieces of a statement: filter predicates with their field,
//! operator and value, select items, and the `FROM` source tree. The
//! planner builds these; the emitter is the only place that turns them
//! into text.

mod node;
mod expr;

pub use node::{Statement, SelectItem, Source, JoinCondition, ArrayJoin, OrderBy};
pub use expr::{Column, Expr, Value, Operator, Field, Predicate};
