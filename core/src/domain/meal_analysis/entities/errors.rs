use thiserror::Error;

/// Failures a pipeline run absorbs instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MealAnalysisError {
    #[error("Could not parse extracted food items: {0}")]
    ExtractionParse(String),

    #[error("Could not parse food classification: {0}")]
    ClassificationParse(String),

    #[error("Product lookup failed: {0}")]
    LookupTransport(String),

    #[error("Could not parse kcal figure from '{0}'")]
    KcalParse(String),
}
