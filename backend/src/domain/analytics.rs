//! Read models returned by the river and collection lookups.

use chrono::NaiveDate;

/// Aggregate of every measurement of one parameter on one river.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Largest value.
    pub maximum: f64,
    /// Smallest value.
    pub minimum: f64,
}

/// Summary statistics reported for a river.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverParameterSummary {
    /// Id of the river the statistics describe.
    pub river_id: i32,
    /// Parameter name.
    pub parameter: String,
    /// Aggregates over every stored measurement.
    pub stats: MeasurementStats,
}

/// One point of a chart series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementPoint {
    /// Date of the collection that produced the value.
    pub sampled_on: NaiveDate,
    /// Measured value.
    pub value: f64,
}

/// Chart data for one parameter on one river, in storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverParameterSeries {
    /// Id of the charted river.
    pub river_id: i32,
    /// Parameter name.
    pub parameter: String,
    /// Points in insertion order.
    pub points: Vec<MeasurementPoint>,
}

/// A measurement with the context of the collection that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverSample {
    /// Collection date.
    pub sampled_on: NaiveDate,
    /// Free-text sampling site.
    pub location: String,
    /// Measured value.
    pub value: f64,
    /// Collection latitude in degrees.
    pub latitude: f64,
    /// Collection longitude in degrees.
    pub longitude: f64,
}

/// Time series of one parameter for one river, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverParameterValues {
    /// River name.
    pub river: String,
    /// Parameter name.
    pub parameter: String,
    /// Samples ascending by date.
    pub samples: Vec<RiverSample>,
}

/// Rivers on which a parameter has been measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterCoverage {
    /// Name of the matched parameter.
    pub parameter: String,
    /// Distinct river names, sorted.
    pub rivers: Vec<String>,
}

/// Parameters measured on a river.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverCoverage {
    /// River name.
    pub river: String,
    /// Distinct parameter names, sorted.
    pub parameters: Vec<String>,
}
