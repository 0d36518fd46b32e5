//! Driving port for model inference.

use crate::domain::{Error, Features, ForestModel};

/// Turns three features into one prediction.
#[cfg_attr(test, mockall::automock)]
pub trait Predictor: Send + Sync {
    /// Evaluate the model; `internal_error` when no model is loaded or the
    /// result is not finite.
    fn predict(&self, features: &Features) -> Result<f64, Error>;
}

impl Predictor for ForestModel {
    fn predict(&self, features: &Features) -> Result<f64, Error> {
        let prediction = self.evaluate(features);
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(Error::internal("model produced a non-finite prediction"))
        }
    }
}

/// Stand-in used when no model artifact is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePredictor;

impl Predictor for UnavailablePredictor {
    fn predict(&self, _features: &Features) -> Result<f64, Error> {
        Err(Error::internal("prediction model is not loaded"))
    }
}
