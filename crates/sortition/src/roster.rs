use derive_more::{AsRef, Deref, Display, From, Into};
use serde_json::Value;
use thiserror::Error;

/// 0-indexed position of the entrant name within a row.
pub const ENTRANT_FIELD: usize = 1;
/// 0-indexed position of the prize within a row.
pub const PRIZE_FIELD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct EntrantName(String);

crate::impl_string_newtype!(EntrantName);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct PrizeLabel(String);

crate::impl_string_newtype!(PrizeLabel);

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON array")]
    NotAnArray,
    #[error("row {0} is not a JSON array")]
    MalformedRow(usize),
}

/// One record of the fetched list, an ordered sequence of text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn entrant(&self) -> Option<EntrantName> {
        self.field(ENTRANT_FIELD).map(EntrantName::new)
    }

    pub fn prize(&self) -> Option<PrizeLabel> {
        self.field(PRIZE_FIELD).map(PrizeLabel::new)
    }
}

/// The ordered list of rows fetched once at startup. Row `i` (1-indexed)
/// belongs to drawn number `i`; the roster never changes after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    rows: Vec<Row>,
}

impl Roster {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row bound to a drawn number (1-based). `None` when the number has
    /// no matching row; callers simply omit the detail fields then.
    pub fn row(&self, number: u32) -> Option<&Row> {
        self.rows.get((number as usize).checked_sub(1)?)
    }

    pub fn from_json_slice(payload: &[u8]) -> Result<Self, RosterError> {
        Self::from_json(serde_json::from_slice(payload)?)
    }

    /// Accepts only an array of arrays; anything else fails closed so a
    /// half-parsed roster can never reach the pool.
    pub fn from_json(value: Value) -> Result<Self, RosterError> {
        let Value::Array(rows) = value else {
            return Err(RosterError::NotAnArray);
        };

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                let Value::Array(cells) = row else {
                    return Err(RosterError::MalformedRow(index));
                };
                Ok(Row::new(cells.iter().map(cell_text).collect()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
