//! Header-driven column mapping
//!
//! The header row is matched against [`COLUMN_RULES`] once per import. Each
//! header is lower-cased and trimmed; the first rule whose keyword occurs in
//! it decides the slot.

use std::fmt;

/// Semantic slot a column can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Title,
    Amount,
    Kind,
    Notes,
    Account,
    Category,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
            Self::Amount => "amount",
            Self::Kind => "type",
            Self::Notes => "notes",
            Self::Account => "account",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword rules; earlier rules take precedence
pub const COLUMN_RULES: &[(Field, &[&str])] = &[
    (Field::Date, &["date", "timestamp"]),
    (Field::Account, &["account", "bank"]),
    (Field::Category, &["category", "tag"]),
    (Field::Notes, &["note", "memo", "comment"]),
    (Field::Amount, &["amount", "value", "sum"]),
    (Field::Title, &["description", "title", "merchant", "payee", "name"]),
    (Field::Kind, &["type", "transaction"]),
];

/// Column index for each semantic slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: Option<usize>,
    pub title: Option<usize>,
    pub amount: Option<usize>,
    pub kind: Option<usize>,
    pub notes: Option<usize>,
    pub account: Option<usize>,
    pub category: Option<usize>,
}

impl ColumnMapping {
    /// Build a mapping from a header row
    ///
    /// A slot keeps the first column assigned to it; later headers matching
    /// the same slot are ignored.
    pub fn from_headers(headers: &[String]) -> Self {
        let mut mapping = Self::default();

        for (index, header) in headers.iter().enumerate() {
            let normalized = header.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }

            let Some(field) = classify_header(&normalized) else {
                tracing::debug!(header = %header, "ignoring unrecognized column");
                continue;
            };

            let slot = mapping.slot_mut(field);
            if slot.is_none() {
                *slot = Some(index);
            }
        }

        mapping
    }

    /// Column index assigned to `field`
    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::Date => self.date,
            Field::Title => self.title,
            Field::Amount => self.amount,
            Field::Kind => self.kind,
            Field::Notes => self.notes,
            Field::Account => self.account,
            Field::Category => self.category,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<usize> {
        match field {
            Field::Date => &mut self.date,
            Field::Title => &mut self.title,
            Field::Amount => &mut self.amount,
            Field::Kind => &mut self.kind,
            Field::Notes => &mut self.notes,
            Field::Account => &mut self.account,
            Field::Category => &mut self.category,
        }
    }

    /// Trimmed value of `field` in `row`, if the column is mapped, present
    /// and non-empty
    pub fn value<'r>(&self, row: &'r [String], field: Field) -> Option<&'r str> {
        self.get(field)
            .and_then(|index| row.get(index))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// All assigned (field, column) pairs
    pub fn assigned(&self) -> Vec<(Field, usize)> {
        COLUMN_RULES
            .iter()
            .filter_map(|(field, _)| self.get(*field).map(|index| (*field, index)))
            .collect()
    }
}

fn classify_header(normalized: &str) -> Option<Field> {
    COLUMN_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(field, _)| *field)
}
