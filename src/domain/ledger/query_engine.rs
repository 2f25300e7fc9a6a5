//! Ledger filtering and sorting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::shared::errors::QueryError;
use crate::shared::types::{Direction, TransactionRecord, TxStatus};
use crate::shared::utils::{end_of_day, start_of_day};

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Either every value or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = QueryError>,
{
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// Sortable record attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Id,
    Date,
    Direction,
    AmountIn,
    AmountOut,
    TokenIn,
    TokenOut,
    SlippageBps,
    Fee,
    Status,
    Signature,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Date => "date",
            SortField::Direction => "type",
            SortField::AmountIn => "amountIn",
            SortField::AmountOut => "amountOut",
            SortField::TokenIn => "tokenIn",
            SortField::TokenOut => "tokenOut",
            SortField::SlippageBps => "slippageBps",
            SortField::Fee => "fee",
            SortField::Status => "status",
            SortField::Signature => "signature",
        }
    }

    fn compare(&self, a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Date => a.timestamp.cmp(&b.timestamp),
            SortField::Direction => cmp_ignore_case(a.direction.as_str(), b.direction.as_str()),
            SortField::AmountIn => a.amount_in.total_cmp(&b.amount_in),
            SortField::AmountOut => a.amount_out.total_cmp(&b.amount_out),
            SortField::TokenIn => cmp_ignore_case(a.token_in().as_str(), b.token_in().as_str()),
            SortField::TokenOut => cmp_ignore_case(a.token_out().as_str(), b.token_out().as_str()),
            SortField::SlippageBps => a.slippage_bps.cmp(&b.slippage_bps),
            SortField::Fee => a.fee.total_cmp(&b.fee),
            SortField::Status => cmp_ignore_case(a.status.as_str(), b.status.as_str()),
            SortField::Signature => cmp_ignore_case(&a.signature, &b.signature),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "date" | "timestamp" => Ok(SortField::Date),
            "type" | "direction" => Ok(SortField::Direction),
            "amountin" | "amount_in" => Ok(SortField::AmountIn),
            "amountout" | "amount_out" => Ok(SortField::AmountOut),
            "tokenin" | "token_in" => Ok(SortField::TokenIn),
            "tokenout" | "token_out" => Ok(SortField::TokenOut),
            "slippagebps" | "slippage_bps" | "slippage" => Ok(SortField::SlippageBps),
            "fee" => Ok(SortField::Fee),
            "status" => Ok(SortField::Status),
            "signature" => Ok(SortField::Signature),
            _ => Err(QueryError::invalid(format!("unknown sort field '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(QueryError::invalid(format!("unknown sort direction '{}'", s))),
        }
    }
}

/// Typed ledger query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub filter_direction: Filter<Direction>,
    pub filter_status: Filter<TxStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            filter_direction: Filter::All,
            filter_status: Filter::All,
            date_from: None,
            date_to: None,
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    pub fn with_direction(mut self, direction: Filter<Direction>) -> Self {
        self.filter_direction = direction;
        self
    }

    pub fn with_status(mut self, status: Filter<TxStatus>) -> Self {
        self.filter_status = status;
        self
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Column-header click: flip direction on the active field, otherwise
    /// switch field and start descending. Always returns to page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
        self.page = 1;
    }

    fn matches(&self, tx: &TransactionRecord) -> bool {
        if !self.filter_direction.matches(&tx.direction) || !self.filter_status.matches(&tx.status) {
            return false;
        }
        if let Some(from) = self.date_from {
            if tx.timestamp < start_of_day(from) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if tx.timestamp > end_of_day(to) {
                return false;
            }
        }
        true
    }
}

/// Query as submitted by the UI layer, every value a string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub filter_type: Option<String>,
    pub filter_status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl TryFrom<QueryParams> for QuerySpec {
    type Error = QueryError;

    fn try_from(params: QueryParams) -> Result<Self, Self::Error> {
        let defaults = QuerySpec::default();

        let page = params.page.unwrap_or(defaults.page);
        if page == 0 {
            return Err(QueryError::invalid("page must be at least 1"));
        }
        let page_size = params.page_size.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(QueryError::invalid("page size must be at least 1"));
        }

        Ok(QuerySpec {
            filter_direction: parse_or(params.filter_type, defaults.filter_direction)?,
            filter_status: parse_or(params.filter_status, defaults.filter_status)?,
            date_from: parse_date(params.date_from)?,
            date_to: parse_date(params.date_to)?,
            sort_field: parse_or(params.sort_field, defaults.sort_field)?,
            sort_direction: parse_or(params.sort_dir, defaults.sort_direction)?,
            page,
            page_size,
        })
    }
}

fn parse_or<T: FromStr<Err = QueryError>>(value: Option<String>, default: T) -> Result<T, QueryError> {
    match value {
        Some(s) if !s.trim().is_empty() => s.parse(),
        _ => Ok(default),
    }
}

/// Empty input means no bound
fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>, QueryError> {
    match value {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|e| QueryError::invalid(format!("malformed date '{}': {}", s, e))),
        _ => Ok(None),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Filter and sort `records` according to `spec`. The sort is stable.
pub fn evaluate(records: &[TransactionRecord], spec: &QuerySpec) -> Vec<TransactionRecord> {
    let mut result: Vec<TransactionRecord> = records
        .iter()
        .filter(|tx| spec.matches(tx))
        .cloned()
        .collect();

    result.sort_by(|a, b| spec.sort_direction.apply(spec.sort_field.compare(a, b)));

    debug!(
        "Query matched {} of {} records (sort {} {})",
        result.len(),
        records.len(),
        spec.sort_field,
        spec.sort_direction.as_str()
    );
    result
}
