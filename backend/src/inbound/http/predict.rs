//! Regression inference endpoint.
//!
//! ```text
//! POST /predict {"feature1":1.0,"feature2":2.0,"feature3":3.0}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Features;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Model input, in training column order.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct PredictRequest {
    /// First feature.
    pub feature1: f64,
    /// Second feature.
    pub feature2: f64,
    /// Third feature.
    pub feature3: f64,
}

impl From<PredictRequest> for Features {
    fn from(value: PredictRequest) -> Self {
        Self([value.feature1, value.feature2, value.feature3])
    }
}

/// Model output.
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictResponse {
    /// Mean of the tree outputs.
    pub prediction: f64,
}

/// Run the loaded model on three features.
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Model output", body = PredictResponse),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 500, description = "Model not loaded or evaluation failed", body = ErrorSchema)
    ),
    tags = ["prediction"],
    operation_id = "predict"
)]
#[post("/predict")]
#[expect(clippy::unused_async, reason = "actix handlers are async")]
pub async fn predict(
    state: web::Data<HttpState>,
    payload: web::Json<PredictRequest>,
) -> ApiResult<web::Json<PredictResponse>> {
    let features = Features::from(payload.into_inner());
    let prediction = state.predictor.predict(&features)?;
    Ok(web::Json(PredictResponse { prediction }))
}
