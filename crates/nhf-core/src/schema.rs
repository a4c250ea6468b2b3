//! JSON Schema generation for the files and outputs the forecaster produces.
//!
//! ```bash
//! nhf schema --list
//! nhf schema PredictionResult
//! nhf schema --all
//! ```

use nhf_common::Result;
use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::config::ConfigSnapshot;
pub use nhf_common::{
    ConfidenceInterval, Factor, FactorKind, FactorStatus, NoHitterEvent, PredictionResult,
    PredictionStatus,
};
pub use nhf_config::ModelConfig;

/// Schema names with a one-line description.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("PredictionResult", "Output of `nhf predict`"),
        ("Factor", "One multiplicative adjustment with its rationale"),
        ("FactorKind", "Names of the adjustment factors"),
        ("FactorStatus", "How a factor's multiplier was obtained"),
        ("ConfidenceInterval", "Monte Carlo band around the probability"),
        ("PredictionStatus", "Ok or degraded with a reason"),
        ("NoHitterEvent", "One historical no-hitter record"),
        ("ModelConfig", "Contents of model.json"),
        ("ConfigSnapshot", "Output of `nhf config show`"),
    ]
}

/// Schema for `type_name`, or `None` if the name is unknown.
pub fn generate_schema(type_name: &str) -> Result<Option<Value>> {
    let schema = match type_name {
        "PredictionResult" => schema_for!(PredictionResult),
        "Factor" => schema_for!(Factor),
        "FactorKind" => schema_for!(FactorKind),
        "FactorStatus" => schema_for!(FactorStatus),
        "ConfidenceInterval" => schema_for!(ConfidenceInterval),
        "PredictionStatus" => schema_for!(PredictionStatus),
        "NoHitterEvent" => schema_for!(NoHitterEvent),
        "ModelConfig" => schema_for!(ModelConfig),
        "ConfigSnapshot" => schema_for!(ConfigSnapshot),
        _ => return Ok(None),
    };
    Ok(Some(serde_json::to_value(schema)?))
}

pub fn generate_all_schemas() -> Result<BTreeMap<String, Value>> {
    let mut schemas = BTreeMap::new();
    for (name, _) in available_schemas() {
        if let Some(schema) = generate_schema(name)? {
            schemas.insert(name.to_string(), schema);
        }
    }
    Ok(schemas)
}
