use thiserror::Error;

/// Errors raised while evaluating predictions against references.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Evaluation was requested over zero prediction/reference pairs.
    #[error("no prediction/reference pairs to evaluate")]
    EmptyInput,

    /// Prediction and reference counts differ. Mismatches are reported,
    /// never truncated.
    #[error("mismatch: {predictions} predictions vs {references} references")]
    LengthMismatch {
        predictions: usize,
        references: usize,
    },
}
