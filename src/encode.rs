use crate::schema::{
    CATEGORICAL_FIELDS, CategoricalField, COUNTRY_FALLBACK, COUNTRY_FIELD, EXCLUDED_RATE_FIELD,
    FEATURE_LEN, NUMERIC_FIELDS,
};
use std::collections::HashMap;

/// Raw per-request input: flat field name -> raw string, as delivered by an
/// HTTP form. Absent keys are permitted everywhere.
pub type RawRecord = HashMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{field} must be a number")]
    FieldFormat { field: String },
}

/// Encode one raw record into the fixed 75-slot vector the classifier
/// expects: numerics in schema order, then one one-hot block per
/// categorical field. A numeric field that is present but unparseable is
/// the only early abort; everything else falls back silently.
pub fn encode(record: &RawRecord) -> Result<Vec<f64>, EncodeError> {
    let mut features = Vec::with_capacity(FEATURE_LEN);

    for name in NUMERIC_FIELDS {
        if name == EXCLUDED_RATE_FIELD {
            features.push(0.0);
            continue;
        }
        match record.get(name) {
            None => features.push(0.0),
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) => features.push(value),
                Err(_) => {
                    return Err(EncodeError::FieldFormat {
                        field: name.to_string(),
                    });
                }
            },
        }
    }

    for field in CATEGORICAL_FIELDS.iter() {
        let raw = record.get(field.name).map(String::as_str).unwrap_or("");
        one_hot(field, raw, &mut features);
    }

    debug_assert_eq!(features.len(), FEATURE_LEN);
    Ok(features)
}

// Exactly one slot of the block is set. Unmatched values select the first
// declared category, except country, which is upper-cased and collapsed to
// its terminal "Other" category before the lookup.
fn one_hot(field: &CategoricalField, raw: &str, out: &mut Vec<f64>) {
    let start = out.len();
    out.resize(start + field.categories.len(), 0.0);

    let index = if field.name == COUNTRY_FIELD {
        let upper = raw.to_uppercase();
        let value = if field.index_of(&upper).is_some() {
            upper
        } else {
            COUNTRY_FALLBACK.to_string()
        };
        field.index_of(&value).unwrap_or(0)
    } else {
        field.index_of(raw).unwrap_or(0)
    };
    out[start + index] = 1.0;
}
