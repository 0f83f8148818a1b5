//! # Rule Evaluation Engine
//!
//! Interprets rule condition trees against decoded public inputs. The
//! engine is pure: no store access, no clock, no randomness.
//!
//! ## Semantics
//!
//! - A condition whose `field` (or `ref_field`) is absent from the inputs
//!   is false. Absence is never an error.
//! - Ordered comparisons (`gt`/`lt`/`gte`/`lte`) require numeric operands.
//!   A present but non-numeric operand is [`EvalError::NonNumericOperand`].
//!   The predecessor implementation silently coerced such operands to 0,
//!   which made comparisons against non-numeric fields spuriously pass or
//!   fail; the typed rejection is pinned by tests.
//! - `eq`/`neq` compare numerically when both operands are numeric and by
//!   canonical string form otherwise.
//! - `in`/`not_in` parse the condition literal as a JSON string array and
//!   test membership of the field's canonical string form.

use thiserror::Error;

use zkv_core::{InputValue, PublicInputs};

use crate::rule::{Condition, ConditionOperator, RuleType, SymbolicRule};

/// Error raised while evaluating a rule.
///
/// Evaluation errors surface as verification outcomes (`valid = false`
/// naming the rule), not transaction aborts; registration-time validation
/// reuses the same type for malformed definitions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The rule definition is structurally invalid.
    #[error("invalid rule definition: {reason}")]
    InvalidRuleDefinition {
        /// Why the definition was rejected.
        reason: String,
    },

    /// The rule type requires more conditions than were declared.
    #[error("{rule_type} requires at least {required} conditions, got {got}")]
    NotEnoughConditions {
        /// The rule type with the arity requirement.
        rule_type: RuleType,
        /// Minimum number of conditions.
        required: usize,
        /// Number actually declared.
        got: usize,
    },

    /// An ordered comparison met a non-numeric operand.
    #[error("non-numeric operand in ordered comparison: {operand} = \"{value}\"")]
    NonNumericOperand {
        /// The field name, or `literal` for the condition's literal value.
        operand: String,
        /// The offending value in canonical string form.
        value: String,
    },

    /// The set literal of an `in`/`not_in` condition is not a JSON string
    /// array.
    #[error("malformed set literal \"{literal}\": {reason}")]
    InvalidSetLiteral {
        /// The literal as written in the condition.
        literal: String,
        /// The JSON parse failure.
        reason: String,
    },
}

/// One rule that failed during a rule-set check.
#[derive(Debug, PartialEq, Eq)]
pub struct RuleViolation {
    /// Name of the violated rule.
    pub rule: String,
    /// The evaluation error, when the failure was a type error rather
    /// than an unsatisfied constraint.
    pub error: Option<EvalError>,
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            Some(err) => write!(f, "rule {}: {err}", self.rule),
            None => write!(f, "rule {} not satisfied", self.rule),
        }
    }
}

/// Outcome of checking a circuit's full rule set.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RuleCheck {
    /// Names of the rules that passed, in evaluation order.
    pub satisfied: Vec<String>,
    /// The first violation, if any. Evaluation short-circuits on it.
    pub violation: Option<RuleViolation>,
}

impl RuleCheck {
    /// Whether every rule passed.
    pub fn all_satisfied(&self) -> bool {
        self.violation.is_none()
    }
}

/// Check every active rule in order, short-circuiting on the first
/// violation. The names of the rules that passed are retained for
/// auditability either way.
pub fn check_rules(rules: &[SymbolicRule], inputs: &PublicInputs) -> RuleCheck {
    let mut check = RuleCheck::default();
    for rule in rules.iter().filter(|r| r.active) {
        match evaluate(rule.rule_type, &rule.conditions, inputs) {
            Ok(true) => check.satisfied.push(rule.name.clone()),
            Ok(false) => {
                check.violation = Some(RuleViolation {
                    rule: rule.name.clone(),
                    error: None,
                });
                return check;
            }
            Err(err) => {
                check.violation = Some(RuleViolation {
                    rule: rule.name.clone(),
                    error: Some(err),
                });
                return check;
            }
        }
    }
    check
}

/// Evaluate a single rule against decoded public inputs.
pub fn evaluate(
    rule_type: RuleType,
    conditions: &[Condition],
    inputs: &PublicInputs,
) -> Result<bool, EvalError> {
    if conditions.is_empty() {
        return Err(EvalError::InvalidRuleDefinition {
            reason: "rule must declare at least one condition".to_string(),
        });
    }
    match rule_type {
        RuleType::Implication => evaluate_implication(conditions, inputs),
        RuleType::Conjunction | RuleType::Comparison | RuleType::Universal => {
            all_hold(conditions, inputs, None)
        }
        RuleType::Disjunction | RuleType::Existential => any_holds(conditions, inputs),
        RuleType::Negation => Ok(!any_holds(conditions, inputs)?),
        RuleType::Equality => all_hold(conditions, inputs, Some(ConditionOperator::Eq)),
        RuleType::Inequality => all_hold(conditions, inputs, Some(ConditionOperator::Neq)),
        RuleType::SetMembership => all_hold(conditions, inputs, Some(ConditionOperator::In)),
    }
}

/// `A → B ∧ C ∧ …`: a false antecedent satisfies the rule vacuously.
fn evaluate_implication(
    conditions: &[Condition],
    inputs: &PublicInputs,
) -> Result<bool, EvalError> {
    if conditions.len() < 2 {
        return Err(EvalError::NotEnoughConditions {
            rule_type: RuleType::Implication,
            required: 2,
            got: conditions.len(),
        });
    }
    if !evaluate_condition(&conditions[0], None, inputs)? {
        return Ok(true);
    }
    all_hold(&conditions[1..], inputs, None)
}

fn all_hold(
    conditions: &[Condition],
    inputs: &PublicInputs,
    forced: Option<ConditionOperator>,
) -> Result<bool, EvalError> {
    for cond in conditions {
        if !evaluate_condition(cond, forced, inputs)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_holds(conditions: &[Condition], inputs: &PublicInputs) -> Result<bool, EvalError> {
    for cond in conditions {
        if evaluate_condition(cond, None, inputs)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The right-hand operand of a condition: another field's value or the
/// condition's literal.
enum Operand<'a> {
    Ref(&'a str, &'a InputValue),
    Literal(&'a str),
}

impl Operand<'_> {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Ref(_, value) => value.as_f64(),
            Self::Literal(s) => s.parse::<f64>().ok(),
        }
    }

    fn canonical_string(&self) -> String {
        match self {
            Self::Ref(_, value) => value.canonical_string(),
            Self::Literal(s) => (*s).to_string(),
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Ref(name, _) => (*name).to_string(),
            Self::Literal(_) => "literal".to_string(),
        }
    }
}

/// Evaluate one condition, optionally with its operator overridden by the
/// enclosing rule type.
fn evaluate_condition(
    cond: &Condition,
    forced: Option<ConditionOperator>,
    inputs: &PublicInputs,
) -> Result<bool, EvalError> {
    let Some(left) = inputs.get(&cond.field) else {
        return Ok(false);
    };

    let right = match cond.ref_field.as_deref() {
        Some(name) if !name.is_empty() => match inputs.get(name) {
            Some(value) => Operand::Ref(name, value),
            None => return Ok(false),
        },
        _ => Operand::Literal(&cond.value),
    };

    let operator = forced.unwrap_or(cond.operator);
    match operator {
        ConditionOperator::Eq => Ok(values_equal(left, &right)),
        ConditionOperator::Neq => Ok(!values_equal(left, &right)),
        ConditionOperator::Gt => ordered(cond, left, &right).map(|(a, b)| a > b),
        ConditionOperator::Lt => ordered(cond, left, &right).map(|(a, b)| a < b),
        ConditionOperator::Gte => ordered(cond, left, &right).map(|(a, b)| a >= b),
        ConditionOperator::Lte => ordered(cond, left, &right).map(|(a, b)| a <= b),
        ConditionOperator::In => Ok(set_contains(cond, left)?),
        ConditionOperator::NotIn => Ok(!set_contains(cond, left)?),
    }
}

/// Deep equality: numeric when both sides are numeric, canonical string
/// form otherwise.
fn values_equal(left: &InputValue, right: &Operand<'_>) -> bool {
    if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
        return a == b;
    }
    left.canonical_string() == right.canonical_string()
}

/// Extract numeric operands for an ordered comparison, rejecting
/// non-numeric values.
fn ordered(
    cond: &Condition,
    left: &InputValue,
    right: &Operand<'_>,
) -> Result<(f64, f64), EvalError> {
    let a = left.as_f64().ok_or_else(|| EvalError::NonNumericOperand {
        operand: cond.field.clone(),
        value: left.canonical_string(),
    })?;
    let b = right.as_f64().ok_or_else(|| EvalError::NonNumericOperand {
        operand: right.name(),
        value: right.canonical_string(),
    })?;
    Ok((a, b))
}

/// Membership of the field's canonical string form in the condition's
/// JSON string-array literal.
fn set_contains(cond: &Condition, left: &InputValue) -> Result<bool, EvalError> {
    let set: Vec<String> =
        serde_json::from_str(&cond.value).map_err(|err| EvalError::InvalidSetLiteral {
            literal: cond.value.clone(),
            reason: err.to_string(),
        })?;
    Ok(set.contains(&left.canonical_string()))
}
