use serde::Serialize;
use std::sync::Arc;
use wqd_utils::numbers::{coerce_f64, coerce_str, looks_numeric};

/// An immutable, shared row sequence as produced by ingestion.
pub type Rows = Arc<[RawRecord]>;

static ABSENT: FieldValue = FieldValue::Absent;

/// A single CSV cell after type inference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Absent,
}

impl FieldValue {
    /// Infer the type of a raw CSV field: empty is absent, numeric-looking
    /// text is a number, everything else stays text.
    pub fn infer(raw: &str) -> FieldValue {
        if raw.is_empty() {
            return FieldValue::Absent;
        }
        if looks_numeric(raw) {
            if let Ok(n) = raw.trim().parse::<f64>() {
                return FieldValue::Number(n);
            }
        }
        FieldValue::Text(raw.to_string())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// The value rendered as text. Integral numbers print without a
    /// fractional part, so a site called `5` reads back as `"5"`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Absent => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Coerce a heterogeneous field to a finite number.
///
/// Absent values and empty text yield `None`; text has `,` separators
/// stripped before parsing; non-finite results are rejected.
pub fn coerce_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Absent => None,
        FieldValue::Number(n) => coerce_f64(*n),
        FieldValue::Text(s) => coerce_str(s),
    }
}

/// One CSV row: the shared header list plus this row's values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    headers: Arc<[String]>,
    values: Vec<FieldValue>,
}

impl RawRecord {
    /// Build a record from shared headers. Missing trailing values read as
    /// absent; extra values beyond the header list are unreachable by name.
    pub fn new(headers: Arc<[String]>, values: Vec<FieldValue>) -> Self {
        Self { headers, values }
    }

    /// Value of a column, or `Absent` when the column is unknown.
    pub fn get(&self, column: &str) -> &FieldValue {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.values.get(i))
            .unwrap_or(&ABSENT)
    }

    /// Value of a column as text, see [`FieldValue::to_text`].
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).to_text()
    }

    /// Value of a column coerced to a finite number.
    pub fn number(&self, column: &str) -> Option<f64> {
        coerce_number(self.get(column))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let (headers, values): (Vec<String>, Vec<FieldValue>) =
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).unzip();
        RawRecord::new(headers.into(), values)
    }
}
