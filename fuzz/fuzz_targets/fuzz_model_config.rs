//! Fuzz target for model.json parsing and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nhf_config::{validate_model, ModelConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = serde_json::from_slice::<ModelConfig>(data) {
        let _ = validate_model(&model);
    }
});
