//! # zkv-rules — Symbolic Rule Set and Evaluation Engine
//!
//! A circuit may carry named logical constraints over its public inputs,
//! evaluated in addition to cryptographic verification. This crate defines
//! the rule types and the pure evaluation engine.
//!
//! ## Architecture
//!
//! - **Rule types** (`rule.rs`): [`SymbolicRule`], [`Condition`],
//!   [`RuleType`], [`ConditionOperator`]. Rules are additive: there is no
//!   update operation, only registration under a fresh name.
//!
//! - **Engine** (`eval.rs`): [`evaluate`] interprets one rule against
//!   decoded public inputs; [`check_rules`] runs a circuit's full active
//!   rule set, short-circuiting on the first violation while retaining the
//!   names of the rules that passed.
//!
//! ## Evaluation Contract
//!
//! Evaluation is a pure function of the rule and the inputs: no store
//! access, no clock, no randomness. A missing input field makes the
//! affected condition false; it is never an error. Type errors (a
//! non-numeric operand in an ordered comparison, a malformed set literal)
//! are typed [`EvalError`]s, not silent coercions.

pub mod eval;
pub mod rule;

pub use eval::{check_rules, evaluate, EvalError, RuleCheck, RuleViolation};
pub use rule::{Condition, ConditionOperator, RuleType, SymbolicRule};
