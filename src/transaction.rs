//! The normalized transaction model shared by the ingestion and aggregation
//! layers.

use time::Date;

/// The grouping label substituted for a blank category.
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// The grouping label substituted for a blank responsible party.
pub const UNASSIGNED_LABEL: &str = "Sin asignar";

/// The two-value discriminator controlling which aggregates a transaction
/// contributes to.
///
/// The tag is taken from the statement's title column (`Titulo`). The
/// statement also carries a `Tipo` column, but that one is a sub-type label,
/// not the income/expense discriminator; reading the wrong column silently
/// corrupts every downstream aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// An expense ("Gasto"). Amounts are negative in the source; consumers
    /// take the absolute value where a magnitude is needed.
    Expense,
    /// An income ("Ingreso").
    Income,
}

impl TransactionKind {
    /// Parses the title tag. Returns `None` for anything but the two
    /// recognized values so the caller can fail with row context.
    pub fn from_title(title: &str) -> Option<Self> {
        match title {
            "Gasto" => Some(Self::Expense),
            "Ingreso" => Some(Self::Income),
            _ => None,
        }
    }

    /// The tag as it appears in the statement.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Expense => "Gasto",
            Self::Income => "Ingreso",
        }
    }
}

/// One normalized financial event derived from a statement row.
///
/// Immutable once constructed; aggregation never mutates transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The calendar date the transaction occurred on (no time-zone
    /// semantics).
    pub date: Date,
    /// The raw time-of-day string from the statement, kept separate from the
    /// date.
    pub time: String,
    /// Free-text description.
    pub description: String,
    /// The payment method label.
    pub payment_method: String,
    /// Where the transaction took place.
    pub place: String,
    /// The signed amount, as reported by the source. Expenses are not forced
    /// negative by the parser.
    pub amount: f64,
    /// The account balance after this transaction, as reported by the source
    /// (never recomputed).
    pub balance: f64,
    /// The income/expense discriminator, decoded from the title column.
    pub kind: TransactionKind,
    /// The category label; may be blank.
    pub category: String,
    /// Additional free-text description; may be blank.
    pub additional_description: String,
    /// The responsible party; may be blank.
    pub responsible: String,
}

impl Transaction {
    /// The category to group this transaction under, substituting the
    /// fallback label for a blank category.
    ///
    /// Fallback substitution happens here, once, rather than in every
    /// aggregation function.
    pub fn effective_category(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED_LABEL
        } else {
            &self.category
        }
    }

    /// The responsible party to group this transaction under, substituting
    /// the fallback label for a blank value.
    pub fn effective_responsible(&self) -> &str {
        if self.responsible.is_empty() {
            UNASSIGNED_LABEL
        } else {
            &self.responsible
        }
    }

    /// The `YYYY-MM` key used for monthly groupings.
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month() as u8)
    }

    /// The `YYYY-MM-DD` key used for daily groupings.
    pub fn day_key(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.date.year(),
            self.date.month() as u8,
            self.date.day()
        )
    }
}
