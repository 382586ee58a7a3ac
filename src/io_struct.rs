use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::encode::RawRecord;

/// Flat field name -> raw value mapping, accepted both as an urlencoded
/// form body and as a JSON object. Fields the schema does not know are
/// ignored; schema fields that are absent get their documented defaults.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct PredictReqInput {
    pub fields: HashMap<String, String>,
}

impl PredictReqInput {
    pub fn into_record(self) -> RawRecord {
        self.fields
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub label: u8,
    pub confidence: Option<f64>,
}

impl PredictionOutcome {
    pub fn verdict(&self) -> &'static str {
        if self.label == 1 {
            "Cancelled"
        } else {
            "Not Cancelled"
        }
    }

    /// Display string for the caller, e.g.
    /// "Prediction: Cancelled (92.50% confidence)".
    pub fn to_text(&self) -> String {
        match self.confidence {
            Some(c) => format!(
                "Prediction: {} ({:.2}% confidence)",
                self.verdict(),
                c * 100.0
            ),
            None => format!("Prediction: {}", self.verdict()),
        }
    }

    pub fn confidence_text(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.2}%", c * 100.0))
    }
}
