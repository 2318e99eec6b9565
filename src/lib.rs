//! Cross-series aggregation for Graphite-compatible query engines.
//!
//! Implements the `aggregate(seriesList, func, xFilesFactor=None)` function,
//! its per-statistic aliases (`sumSeries`, `avg`, `rangeOfSeries`, ...) and
//! the registry that maps every public function name to its implementation.
//!
//! Series are fetched by the caller and handed in as [`Values`]; targets are
//! parsed and then evaluated bottom-up by an [`Interpreter`].
//!
//! ```
//! use graphagg::{Context, Interpreter, MetricRequest, Registry, Series, Values};
//! use std::sync::Arc;
//!
//! let mut values = Values::default();
//! values.insert(
//!     MetricRequest::new("host.*.cpu", 0, 3),
//!     vec![
//!         Arc::new(Series::new("host.a.cpu", vec![1.0, 2.0, 3.0], 1, 0)),
//!         Arc::new(Series::new("host.b.cpu", vec![3.0, 4.0, f64::NAN], 1, 0)),
//!     ],
//! );
//!
//! let eval = Interpreter::new(Registry::builder().build("")?);
//!
//! let result = eval.eval_target(
//!     &Context::background(),
//!     "aggregate(host.*.cpu, 'avg')",
//!     0,
//!     3,
//!     &values,
//! )?;
//!
//! assert_eq!("averageSeries(host.*.cpu)", result[0].name);
//! assert_eq!(vec![2.0, 3.0, 3.0], result[0].values);
//! assert_eq!("average", result[0].tags["aggregatedBy"]);
//!
//! # Ok::<(), graphagg::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod aggregation;
mod builder;
mod config;

pub mod consolidation;

mod context;
mod error;
mod eval;

pub mod expr;

mod function;

pub mod functions;

mod registry;
mod series;

pub mod tags;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

/// Value used in time series
pub type Value = f64;

pub use aggregation::aggregate_series;
pub use builder::Builder;
pub use config::Config;
pub use consolidation::{consolidation_by_name, Statistic};
pub use context::Context;
pub use error::{Error, Result};
pub use eval::{get_series_arg, get_series_args_and_remove_non_existing, Evaluator, Interpreter};
pub use expr::{Call, Expr};
pub use function::{Function, FunctionDescription, FunctionMetadata, FunctionParam, ParamType};
pub use registry::Registry;
pub use series::{common_tags, MetricRequest, Series, SeriesList, Values};
