use crate::{
    config::Config,
    consolidation::Statistic,
    context::Context,
    expr::Call,
    series::{common_tags, Series},
    tags::{extract_tags_from_expr, NAME_TAG},
    Value,
};
use std::sync::Arc;

/// Returns `true` if enough inputs are present for an aggregate point to be valid.
#[allow(clippy::cast_precision_loss)]
fn meets_x_files_factor(present: usize, total: usize, x_files_factor: f32) -> bool {
    if total == 0 {
        return false;
    }

    present as f32 / total as f32 >= x_files_factor
}

/// Returns `true` if the context is due for a check before computing point `idx`.
fn is_checkpoint(idx: usize, interval: usize) -> bool {
    idx > 0 && idx % interval == 0
}

/// Combines aligned series point by point into one series.
///
/// All inputs are expected to share `start` and `step`; the first series
/// defines the time axis, shorter series read as missing past their end.
///
/// `display` is the call as it should be shown; the output series is named after it.
///
/// With `x_files_factor` set, points where fewer than that fraction of the
/// inputs are present become missing. Points without any present input
/// are always missing.
///
/// Inputs are never modified, an empty input yields no output.
///
/// # Errors
///
/// Returns an error if the context was cancelled.
pub fn aggregate_series(
    ctx: &Context,
    display: &Call,
    args: &[Arc<Series>],
    statistic: Statistic,
    x_files_factor: Option<f32>,
    config: &Config,
) -> crate::Result<Vec<Series>> {
    let Some(first) = args.first() else {
        return Ok(vec![]);
    };

    ctx.check()?;

    let name = display.to_string();
    let total = args.len();
    let interval = config.cancellation_interval.max(1);

    let mut values = Vec::with_capacity(first.len());
    let mut present: Vec<Value> = Vec::with_capacity(total);

    for idx in 0..first.len() {
        if is_checkpoint(idx, interval) {
            ctx.check()?;
        }

        present.clear();
        present.extend(args.iter().filter_map(|series| series.get(idx)));

        let point = match x_files_factor {
            Some(xff) if !meets_x_files_factor(present.len(), total, xff) => None,
            _ => statistic.reduce(&present),
        };

        values.push(point.unwrap_or(Value::NAN));
    }

    let mut tags = common_tags(args);
    if !tags.contains_key(NAME_TAG) {
        tags.insert(NAME_TAG.to_owned(), name.clone());
    }
    if config.extract_tags_from_args {
        if let Some(arg) = display.arg(0) {
            tags.extend(extract_tags_from_expr(arg));
        }
    }

    log::debug!("aggregated {total} series into {name:?} using {statistic}");

    Ok(vec![Series {
        name,
        values,
        start: first.start,
        stop: first.stop,
        step: first.step,
        x_files_factor: first.x_files_factor,
        tags,
    }])
}
