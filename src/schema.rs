/// Ordered layout of the feature vector the classifier was trained on:
/// all numeric fields first, then one one-hot block per categorical field.
/// This table must stay byte-identical to the training-side schema; the
/// width check against the loaded model happens in `AppState::new`.
pub const FEATURE_LEN: usize = 75;

pub const NUMERIC_FIELDS: [&str; 14] = [
    "lead_time",
    "stays_in_weekend_nights",
    "stays_in_week_nights",
    "adults",
    "children",
    "babies",
    "is_repeated_guest",
    "previous_cancellations",
    "previous_bookings_not_canceled",
    "booking_changes",
    "days_in_waiting_list",
    "adr",
    "required_car_parking_spaces",
    "total_of_special_requests",
];

// adr keeps its slot for layout compatibility but is never read from the
// caller; it always encodes as 0.
pub const EXCLUDED_RATE_FIELD: &str = "adr";

// country is matched case-insensitively and unmatched codes collapse to
// this terminal category instead of the first one.
pub const COUNTRY_FIELD: &str = "country";
pub const COUNTRY_FALLBACK: &str = "Other";

#[derive(Debug, Clone)]
pub struct CategoricalField {
    pub name: &'static str,
    pub categories: &'static [&'static str],
}

pub const CATEGORICAL_FIELDS: [CategoricalField; 8] = [
    CategoricalField {
        name: "meal",
        categories: &["BB", "FB", "HB", "SC", "Undefined"],
    },
    CategoricalField {
        name: "market_segment",
        categories: &[
            "Direct",
            "Corporate",
            "Online TA",
            "Offline TA/TO",
            "Groups",
            "Aviation",
        ],
    },
    CategoricalField {
        name: "distribution_channel",
        categories: &["Direct", "Corporate", "TA/TO", "GDS"],
    },
    CategoricalField {
        name: "reserved_room_type",
        categories: &["A", "B", "C", "D", "E", "F", "G", "H"],
    },
    CategoricalField {
        name: "assigned_room_type",
        categories: &["A", "B", "C", "D", "E", "F", "G", "H", "I", "K"],
    },
    CategoricalField {
        name: "deposit_type",
        categories: &["No Deposit", "Non Refund", "Refundable"],
    },
    CategoricalField {
        name: "customer_type",
        categories: &["Transient", "Contract", "Transient-Party", "Group"],
    },
    CategoricalField {
        name: "country",
        categories: &[
            "PRT", "GBR", "USA", "ESP", "IRL", "FRA", "ROU", "NOR", "OMN", "ARG", "POL", "DEU",
            "BEL", "CHE", "CN", "GRC", "ITA", "NLD", "DNK", "RUS", "Other",
        ],
    },
];

impl CategoricalField {
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.categories.iter().position(|c| *c == value)
    }
}

pub fn feature_len() -> usize {
    NUMERIC_FIELDS.len()
        + CATEGORICAL_FIELDS
            .iter()
            .map(|f| f.categories.len())
            .sum::<usize>()
}

/// Slot index of a numeric field in the encoded vector.
pub fn numeric_position(name: &str) -> Option<usize> {
    NUMERIC_FIELDS.iter().position(|f| *f == name)
}

/// (start, len) of a categorical field's one-hot block in the encoded vector.
pub fn categorical_block(name: &str) -> Option<(usize, usize)> {
    let mut offset = NUMERIC_FIELDS.len();
    for field in CATEGORICAL_FIELDS.iter() {
        if field.name == name {
            return Some((offset, field.categories.len()));
        }
        offset += field.categories.len();
    }
    None
}
