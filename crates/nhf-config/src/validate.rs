//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::model::{
    DateSpecificParams, DecadalParams, LedgerParams, ModelConfig, MonteCarloParams, MonthlyParams,
    RecencyParams, SeasonParams,
};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }

    /// Dotted path of the offending field, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Validate the model configuration semantically.
pub fn validate_model(config: &ModelConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    validate_season(&config.season)?;
    validate_monthly(&config.monthly)?;
    validate_date_specific(&config.date_specific)?;
    validate_decadal(&config.decadal)?;
    validate_recency(&config.recency)?;
    validate_monte_carlo(&config.monte_carlo)?;
    validate_ledger(&config.ledger)?;

    Ok(())
}

fn positive(field: &str, value: f64) -> ValidationResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be positive, got {}", value),
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be non-negative, got {}", value),
        });
    }
    Ok(())
}

fn validate_season(season: &SeasonParams) -> ValidationResult<()> {
    if season.months.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "season.months".to_string(),
            message: "At least one season month is required".to_string(),
        });
    }

    let mut seen = [false; 13];
    for &month in &season.months {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidValue {
                field: "season.months".to_string(),
                message: format!("Month must be in 1..=12, got {}", month),
            });
        }
        if seen[month as usize] {
            return Err(ValidationError::InvalidValue {
                field: "season.months".to_string(),
                message: format!("Month {} listed twice", month),
            });
        }
        seen[month as usize] = true;
    }

    positive("season.season_length_days", season.season_length_days)?;
    if season.season_length_days > 366.0 {
        return Err(ValidationError::InvalidValue {
            field: "season.season_length_days".to_string(),
            message: format!("Cannot exceed 366, got {}", season.season_length_days),
        });
    }

    if season.min_year > season.max_year {
        return Err(ValidationError::SemanticError(format!(
            "season.min_year ({}) is after season.max_year ({})",
            season.min_year, season.max_year
        )));
    }

    if let (Some(start), Some(end)) = (season.history_start_year, season.history_end_year) {
        if start > end {
            return Err(ValidationError::SemanticError(format!(
                "season.history_start_year ({}) is after season.history_end_year ({})",
                start, end
            )));
        }
    }

    Ok(())
}

fn validate_monthly(monthly: &MonthlyParams) -> ValidationResult<()> {
    positive("monthly.smoothing", monthly.smoothing)?;
    positive("monthly.min_in_season_factor", monthly.min_in_season_factor)?;
    positive("monthly.off_season_factor", monthly.off_season_factor)?;

    // Off-season dates must always rank below in-season ones.
    if monthly.off_season_factor >= monthly.min_in_season_factor {
        return Err(ValidationError::SemanticError(format!(
            "monthly.off_season_factor ({}) must be below monthly.min_in_season_factor ({})",
            monthly.off_season_factor, monthly.min_in_season_factor
        )));
    }

    Ok(())
}

fn validate_date_specific(params: &DateSpecificParams) -> ValidationResult<()> {
    non_negative("date_specific.shrinkage", params.shrinkage)?;
    if !(params.max_factor.is_finite() && params.max_factor >= 1.0) {
        return Err(ValidationError::InvalidValue {
            field: "date_specific.max_factor".to_string(),
            message: format!("Must be at least 1.0, got {}", params.max_factor),
        });
    }
    Ok(())
}

fn validate_decadal(params: &DecadalParams) -> ValidationResult<()> {
    positive("decadal.decay_years", params.decay_years)?;
    positive("decadal.min_weight", params.min_weight)?;
    positive("decadal.max_weight", params.max_weight)?;
    if params.min_weight > 1.0 || params.max_weight < 1.0 {
        return Err(ValidationError::SemanticError(format!(
            "decadal weight bounds [{}, {}] must contain 1.0",
            params.min_weight, params.max_weight
        )));
    }
    Ok(())
}

fn validate_recency(params: &RecencyParams) -> ValidationResult<()> {
    non_negative("recency.strength", params.strength)?;
    positive("recency.floor", params.floor)?;
    positive("recency.cap", params.cap)?;
    if params.floor > 1.0 || params.cap < 1.0 {
        return Err(ValidationError::SemanticError(format!(
            "recency bounds [{}, {}] must contain 1.0",
            params.floor, params.cap
        )));
    }
    if params.min_gaps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "recency.min_gaps".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_monte_carlo(params: &MonteCarloParams) -> ValidationResult<()> {
    if params.trials == 0 {
        return Err(ValidationError::InvalidValue {
            field: "monte_carlo.trials".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }
    if !(params.level > 0.0 && params.level < 1.0) {
        return Err(ValidationError::InvalidValue {
            field: "monte_carlo.level".to_string(),
            message: format!("Must be in (0, 1), got {}", params.level),
        });
    }
    non_negative("monte_carlo.max_sigma", params.max_sigma)?;
    Ok(())
}

fn validate_ledger(params: &LedgerParams) -> ValidationResult<()> {
    if params.retain == 0 {
        return Err(ValidationError::InvalidValue {
            field: "ledger.retain".to_string(),
            message: "Must keep at least one entry".to_string(),
        });
    }
    Ok(())
}
