//! Local walkthrough of the verification module against an in-memory
//! store: register a circuit and a rule, submit a passing and a failing
//! proof, and challenge the passing one. Useful for eyeballing the event
//! stream; state evaporates on exit.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;
use zkv_core::{AccountId, FieldType, ProofSystem, PublicInputField};
use zkv_module::{
    ChallengeProofMsg, ExecContext, Keeper, RegisterCircuitMsg, RegisterSymbolicRuleMsg,
    SubmitProofMsg,
};
use zkv_rules::{Condition, ConditionOperator, RuleType};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let authority = AccountId::new("zkv1gov");
    let mut keeper = Keeper::in_memory(authority.clone());

    // Stands in for the hosting ledger's block clock.
    let genesis_time = Utc::now();
    let admin = ExecContext::new(1, genesis_time, authority);

    keeper.register_circuit(
        &admin,
        RegisterCircuitMsg {
            name: "transfer".to_string(),
            verification_key: vec![7u8; 32],
            proof_system: ProofSystem::Stark,
            public_input_schema: vec![PublicInputField {
                name: "amount".to_string(),
                field_type: FieldType::Uint64,
                required: true,
            }],
            description: "token transfer circuit".to_string(),
            max_recursion_depth: 4,
        },
    )?;

    keeper.register_symbolic_rule(
        &admin,
        RegisterSymbolicRuleMsg {
            circuit_name: "transfer".to_string(),
            rule_name: "positive-amount".to_string(),
            rule_type: RuleType::Comparison,
            conditions: vec![Condition {
                field: "amount".to_string(),
                operator: ConditionOperator::Gt,
                value: "0".to_string(),
                ref_field: None,
            }],
            description: "amounts must be positive".to_string(),
        },
    )?;

    let alice = ExecContext::new(
        2,
        genesis_time + Duration::seconds(30),
        AccountId::new("zkv1alice"),
    );
    let submit = |amount: i64| SubmitProofMsg {
        circuit_name: "transfer".to_string(),
        proof_data: vec![1u8; 64],
        public_inputs: format!(r#"{{"fields":{{"amount":{amount}}}}}"#).into_bytes(),
        data_commitment: vec![],
        data_uri: None,
        recursive_proofs: vec![],
    };

    let accepted = keeper.submit_proof(&alice, submit(100))?;
    let rejected = keeper.submit_proof(&alice, submit(0))?;
    tracing::info!(
        accepted = %accepted.proof_id,
        rejected = %rejected.proof_id,
        rejected_error = rejected.error.as_deref().unwrap_or(""),
        "submissions processed"
    );

    let watcher = ExecContext::new(
        3,
        genesis_time + Duration::hours(1),
        AccountId::new("zkv1watcher"),
    );
    // The hash-binding checker accepts almost no fraud proofs; a rejection
    // here is the expected outcome and shows the abort channel.
    match keeper.challenge_proof(
        &watcher,
        ChallengeProofMsg {
            proof_id: accepted.proof_id,
            fraud_proof: vec![3u8; 32],
            reason: "demonstration".to_string(),
        },
    ) {
        Ok(out) => tracing::info!(proof_id = %out.proof_id, "challenge accepted"),
        Err(err) => tracing::info!(%err, "challenge rejected"),
    }

    let after_window = genesis_time + Duration::hours(25);
    tracing::info!(
        finalized = keeper.query_finalized(accepted.proof_id, after_window)?,
        "final status past the challenge window"
    );
    Ok(())
}
