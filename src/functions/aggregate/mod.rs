//! `aggregate(seriesList, func, xFilesFactor=None)` and its per-statistic
//! aliases (`sum`, `sumSeries`, `avg`, `averageSeries`, ...).

mod description;

use super::x_files_factor;
use crate::{
    aggregation::aggregate_series,
    config::Config,
    consolidation::{consolidation_by_name, Statistic},
    context::Context,
    eval::{get_series_arg, get_series_args_and_remove_non_existing, Evaluator},
    expr::Call,
    function::{Function, FunctionDescription, FunctionMetadata},
    series::{SeriesList, Values},
    Error, HashMap,
};
use std::sync::Arc;

/// Name of the canonical entry point
pub const AGGREGATE: &str = "aggregate";

/// Tag recording which statistic produced a series
pub const AGGREGATED_BY: &str = "aggregatedBy";

const SERIES_SUFFIX: &str = "Series";

/// How a public name is invoked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CallShape {
    /// `aggregate(seriesList, func, xFilesFactor=None)`
    Canonical,

    /// `sum(*seriesLists)`
    Bare(Statistic),

    /// `sumSeries(*seriesLists)`
    Suffixed(Statistic),
}

/// The shared implementation behind every public name of this family.
pub struct Aggregate {
    /// Public names in registration order
    names: Vec<String>,
    shapes: HashMap<String, CallShape>,
    config: Config,
}

impl Aggregate {
    fn new(config: &Config) -> Self {
        let mut names = vec![AGGREGATE.to_owned()];

        for stat in Statistic::ALL {
            for spelling in stat.spellings() {
                names.push((*spelling).to_owned());
                names.push(format!("{spelling}{SERIES_SUFFIX}"));
            }
        }

        let shapes = names
            .iter()
            .filter_map(|name| Some((name.clone(), Self::shape_of(name)?)))
            .collect();

        Self {
            names,
            shapes,
            config: config.clone(),
        }
    }

    fn shape_of(name: &str) -> Option<CallShape> {
        if name == AGGREGATE {
            return Some(CallShape::Canonical);
        }

        if let Some(stat) = Statistic::from_name(name) {
            return Some(CallShape::Bare(stat));
        }

        name.strip_suffix(SERIES_SUFFIX)
            .and_then(Statistic::from_name)
            .map(CallShape::Suffixed)
    }

    /// Resolves the canonical form's arguments.
    ///
    /// Returns `None` if the series list matched nothing.
    fn canonical_args(
        ctx: &Context,
        eval: &dyn Evaluator,
        call: &Call,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<Option<(SeriesList, Statistic, f32)>> {
        // NOTE: The statistic is mandatory here, `aggregate(a.*)` is a usage error
        let name = call.get_string_arg(1)?;

        let arg = call.arg(0).ok_or_else(|| Error::MissingArgument {
            function: AGGREGATE.to_owned(),
            index: 0,
        })?;

        let series = get_series_arg(ctx, eval, arg, from, until, values)?;
        let Some(first) = series.first() else {
            return Ok(None);
        };

        // NOTE: setXFilesFactor gives every series of a list the same factor
        let default = f64::from(first.x_files_factor);
        let xff = x_files_factor(call.get_float_arg_default(2, super::X_FILES_FACTOR, default)?)?;

        let statistic = consolidation_by_name(name)?;

        Ok(Some((series, statistic, xff)))
    }
}

impl Function for Aggregate {
    fn evaluate(
        &self,
        ctx: &Context,
        eval: &dyn Evaluator,
        call: &Call,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList> {
        let Some(&shape) = self.shapes.get(call.target()) else {
            return Err(Error::UnknownFunction(call.target().to_owned()));
        };

        let (args, statistic, threshold) = match shape {
            CallShape::Canonical => {
                match Self::canonical_args(ctx, eval, call, from, until, values)? {
                    Some((args, statistic, xff)) => (args, statistic, Some(xff)),
                    None => {
                        log::debug!("{call} did not match any series");
                        return Ok(vec![]);
                    }
                }
            }
            CallShape::Bare(statistic) | CallShape::Suffixed(statistic) => {
                let args = get_series_args_and_remove_non_existing(
                    ctx, eval, call, from, until, values,
                )?;

                if args.is_empty() {
                    log::debug!("{call} did not match any series");
                    return Ok(vec![]);
                }

                // NOTE: The alias forms never take a threshold
                if call.has_named_args() {
                    log::debug!("{} ignores keyword arguments in {call}", call.target());
                }

                (args, statistic, None)
            }
        };

        log::trace!(
            "{} ({shape:?}) aggregates {} series by {statistic}",
            call.target(),
            args.len()
        );

        let mut display = call.clone();
        display.set_target(format!("{}{SERIES_SUFFIX}", statistic.name()));
        if shape == CallShape::Canonical {
            if let Some(arg) = call.arg(0) {
                display.set_raw_args(arg.to_string());
            }
        }

        let results = aggregate_series(
            ctx,
            &display,
            &args,
            statistic,
            threshold,
            &self.config,
        )?;

        Ok(results
            .into_iter()
            .map(|mut series| {
                series.set_tag(AGGREGATED_BY, statistic.name());
                Arc::new(series)
            })
            .collect())
    }

    fn description(&self) -> HashMap<String, FunctionDescription> {
        self.names
            .iter()
            .map(|name| (name.clone(), description::describe(name)))
            .collect()
    }
}

/// Registers `aggregate` plus a bare and a `...Series` alias for every
/// spelling of every statistic, all served by one shared instance.
#[must_use]
pub fn new(_config_file: &str, config: &Config) -> Vec<FunctionMetadata> {
    let function = Arc::new(Aggregate::new(config));

    log::debug!("aggregate family has {} names", function.names.len());

    function
        .names
        .iter()
        .map(|name| FunctionMetadata {
            name: name.clone(),
            function: function.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests;
