//! Point-wise reducers that combine the values of many series at one timestamp.

mod avg;
mod count;
mod diff;
mod last;
mod max;
mod median;
mod min;
mod multiply;
mod range;
mod stddev;
mod sum;

use crate::Value;

/// Defines a reduction over the present values at one timestamp.
///
/// - `init` seeds the accumulator with the first value (default: Identity)
///
/// - `transform` folds each following value in (default: Add)
///
/// - `finish` can transform the result value (default: Identity)
///
/// Reducers that are not a simple fold override `reduce`.
pub(crate) trait Reducer {
    fn init(value: Value) -> Value {
        value
    }

    fn transform(accu: Value, x: Value) -> Value {
        accu + x
    }

    fn finish(accu: Value, _len: usize) -> Value {
        accu
    }

    /// Reduces the present values, returns `None` if there are none.
    fn reduce(values: &[Value]) -> Option<Value> {
        let (&first, rest) = values.split_first()?;

        let accu = rest
            .iter()
            .fold(Self::init(first), |accu, &x| Self::transform(accu, x));

        Some(Self::finish(accu, values.len()))
    }
}

/// A named consolidation rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Sum of all values
    Sum,

    /// Arithmetic mean
    Average,

    /// Smallest value
    Min,

    /// Largest value
    Max,

    /// Product of all values
    Multiply,

    /// Number of present values
    Count,

    /// First value minus all others
    Diff,

    /// Largest minus smallest value
    Range,

    /// Population standard deviation
    Stddev,

    /// Middle value, or mean of the two middle values
    Median,

    /// Value of the series listed last
    Last,
}

impl Statistic {
    /// Every statistic, in documentation order.
    pub const ALL: [Self; 11] = [
        Self::Average,
        Self::Median,
        Self::Sum,
        Self::Min,
        Self::Max,
        Self::Diff,
        Self::Stddev,
        Self::Count,
        Self::Range,
        Self::Multiply,
        Self::Last,
    ];

    /// Canonical name, used for the `aggregatedBy` tag and the `...Series` display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
            Self::Min => "min",
            Self::Max => "max",
            Self::Multiply => "multiply",
            Self::Count => "count",
            Self::Diff => "diff",
            Self::Range => "range",
            Self::Stddev => "stddev",
            Self::Median => "median",
            Self::Last => "last",
        }
    }

    /// All accepted spellings, canonical name first.
    #[must_use]
    pub const fn spellings(self) -> &'static [&'static str] {
        match self {
            Self::Sum => &["sum", "total"],
            Self::Average => &["average", "avg"],
            Self::Range => &["range", "rangeOf"],
            Self::Last => &["last", "current"],
            Self::Min => &["min"],
            Self::Max => &["max"],
            Self::Multiply => &["multiply"],
            Self::Count => &["count"],
            Self::Diff => &["diff"],
            Self::Stddev => &["stddev"],
            Self::Median => &["median"],
        }
    }

    /// Looks up a statistic by exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.spellings().iter().any(|&s| s == name))
    }

    /// Applies the statistic to the present values at one timestamp.
    ///
    /// Returns `None` if `values` is empty.
    #[must_use]
    pub fn reduce(self, values: &[Value]) -> Option<Value> {
        match self {
            Self::Sum => sum::Sum::reduce(values),
            Self::Average => avg::Average::reduce(values),
            Self::Min => min::Min::reduce(values),
            Self::Max => max::Max::reduce(values),
            Self::Multiply => multiply::Multiply::reduce(values),
            Self::Count => count::Count::reduce(values),
            Self::Diff => diff::Diff::reduce(values),
            Self::Range => range::Range::reduce(values),
            Self::Stddev => stddev::Stddev::reduce(values),
            Self::Median => median::Median::reduce(values),
            Self::Last => last::Last::reduce(values),
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolves a consolidation function name.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedConsolidation`] if the name is unknown.
pub fn consolidation_by_name(name: &str) -> crate::Result<Statistic> {
    Statistic::from_name(name).ok_or_else(|| {
        log::debug!("unsupported consolidation function {name:?}");
        crate::Error::UnsupportedConsolidation(name.to_owned())
    })
}

/// Every accepted consolidation name, canonical names and their spellings.
#[must_use]
pub fn available_consolidations() -> Vec<&'static str> {
    Statistic::ALL
        .iter()
        .flat_map(|stat| stat.spellings().iter().copied())
        .collect()
}
