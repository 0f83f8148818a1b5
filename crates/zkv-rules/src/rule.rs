//! # Symbolic Rule Types
//!
//! A [`SymbolicRule`] is a named logical constraint attached to one
//! circuit. Each rule has a [`RuleType`] giving the connective and a list
//! of [`Condition`]s over public-input fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::eval::EvalError;

/// The logical connective of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// If the first condition holds, all remaining conditions must hold.
    Implication,
    /// Every condition must hold.
    Conjunction,
    /// At least one condition must hold.
    Disjunction,
    /// No condition may hold.
    Negation,
    /// Every condition must hold as given (finite-domain ∀ over the
    /// declared condition list).
    Universal,
    /// At least one condition must hold as given (finite-domain ∃ over
    /// the declared condition list).
    Existential,
    /// Every condition, with its operator forced to `eq`.
    Equality,
    /// Every condition, with its operator forced to `neq`.
    Inequality,
    /// Every condition with its operator taken verbatim.
    Comparison,
    /// Every condition, with its operator forced to `in`.
    SetMembership,
}

impl RuleType {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implication => "implication",
            Self::Conjunction => "conjunction",
            Self::Disjunction => "disjunction",
            Self::Negation => "negation",
            Self::Universal => "universal",
            Self::Existential => "existential",
            Self::Equality => "equality",
            Self::Inequality => "inequality",
            Self::Comparison => "comparison",
            Self::SetMembership => "set_membership",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The comparison operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Deep value equality.
    Eq,
    /// Deep value inequality.
    Neq,
    /// Numeric greater-than.
    Gt,
    /// Numeric less-than.
    Lt,
    /// Numeric greater-or-equal.
    Gte,
    /// Numeric less-or-equal.
    Lte,
    /// Membership in a JSON string-array literal.
    In,
    /// Non-membership in a JSON string-array literal.
    NotIn,
}

impl ConditionOperator {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "not_in",
        }
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One comparison over public-input fields.
///
/// The left operand is the field named by `field`. The right operand is
/// the value of `ref_field` when set, otherwise the literal `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Name of the public-input field on the left-hand side.
    pub field: String,
    /// The comparison operator.
    pub operator: ConditionOperator,
    /// Literal right-hand side. For `in`/`not_in` this is a JSON string
    /// array of allowed values.
    pub value: String,
    /// When set, compare against this field instead of the literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_field: Option<String>,
}

/// A named logical constraint attached to one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicRule {
    /// Rule name, unique per circuit.
    pub name: String,
    /// The circuit this rule constrains.
    pub circuit_name: String,
    /// The logical connective.
    pub rule_type: RuleType,
    /// The conditions the connective combines. Never empty.
    pub conditions: Vec<Condition>,
    /// Free-form operator description.
    pub description: String,
    /// Whether the rule participates in evaluation.
    pub active: bool,
    /// Block time at registration.
    pub created_at: DateTime<Utc>,
}

impl SymbolicRule {
    /// Validate the structural invariants of a rule definition.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.name.is_empty() {
            return Err(EvalError::InvalidRuleDefinition {
                reason: "rule name must not be empty".to_string(),
            });
        }
        if self.circuit_name.is_empty() {
            return Err(EvalError::InvalidRuleDefinition {
                reason: "circuit name must not be empty".to_string(),
            });
        }
        if self.conditions.is_empty() {
            return Err(EvalError::InvalidRuleDefinition {
                reason: "rule must declare at least one condition".to_string(),
            });
        }
        if self.rule_type == RuleType::Implication && self.conditions.len() < 2 {
            return Err(EvalError::NotEnoughConditions {
                rule_type: RuleType::Implication,
                required: 2,
                got: self.conditions.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rule_type: RuleType, conditions: Vec<Condition>) -> SymbolicRule {
        SymbolicRule {
            name: "r1".to_string(),
            circuit_name: "c1".to_string(),
            rule_type,
            conditions,
            description: String::new(),
            active: true,
            created_at: Utc::now(),
        }
    }

    fn cond(field: &str) -> Condition {
        Condition {
            field: field.to_string(),
            operator: ConditionOperator::Eq,
            value: "1".to_string(),
            ref_field: None,
        }
    }

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&RuleType::SetMembership).unwrap(),
            r#""set_membership""#
        );
        assert_eq!(
            serde_json::to_string(&ConditionOperator::NotIn).unwrap(),
            r#""not_in""#
        );
    }

    #[test]
    fn rule_without_conditions_rejected() {
        assert!(rule(RuleType::Conjunction, vec![]).validate().is_err());
    }

    #[test]
    fn implication_needs_two_conditions() {
        let r = rule(RuleType::Implication, vec![cond("a")]);
        assert!(matches!(
            r.validate(),
            Err(EvalError::NotEnoughConditions { required: 2, .. })
        ));
        let r = rule(RuleType::Implication, vec![cond("a"), cond("b")]);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn empty_names_rejected() {
        let mut r = rule(RuleType::Conjunction, vec![cond("a")]);
        r.name = String::new();
        assert!(r.validate().is_err());

        let mut r = rule(RuleType::Conjunction, vec![cond("a")]);
        r.circuit_name = String::new();
        assert!(r.validate().is_err());
    }
}
