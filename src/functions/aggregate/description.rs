use super::{AGGREGATE, SERIES_SUFFIX};
use crate::{
    consolidation::{available_consolidations, Statistic},
    function::{FunctionDescription, FunctionParam, ParamType},
    functions::{COMBINE, X_FILES_FACTOR},
};

fn summary(stat: Statistic) -> &'static str {
    match stat {
        Statistic::Sum => {
            "Adds metrics together and returns the sum at each datapoint. \
             (See integral for a sum over time)"
        }
        Statistic::Average => "Draws the average value of all metrics passed at each time.",
        Statistic::Min => {
            "For each datapoint from each metric passed in, picks the minimum value."
        }
        Statistic::Max => {
            "For each datapoint from each metric passed in, picks the maximum value."
        }
        Statistic::Multiply => {
            "Takes two or more series and multiplies their points. \
             To multiply by a constant, use the scale() function."
        }
        Statistic::Count => "Draws the number of metrics that have a value at each time.",
        Statistic::Diff => {
            "Subtracts series 2 through n from series 1. \
             To diff a series and a constant, use offset instead."
        }
        Statistic::Range => {
            "Draws the difference between the largest and the smallest value at each time."
        }
        Statistic::Stddev => {
            "Draws the (population) standard deviation of all metrics passed at each time."
        }
        Statistic::Median => "Draws the median value of all metrics passed at each time.",
        Statistic::Last => "Draws the value of the metric listed last at each time.",
    }
}

fn describe_aggregate() -> FunctionDescription {
    FunctionDescription {
        name: AGGREGATE.to_owned(),
        function: format!("{AGGREGATE}(seriesList, func, {X_FILES_FACTOR}=None)"),
        description: format!(
            "Aggregate series using the specified function.\n\n\
             Example:\n\n  &target=aggregate(host.cpu-[0-7].cpu-{{user,system}}.value, \"sum\")\n\n\
             This would be the equivalent of\n\n  &target=sumSeries(host.cpu-[0-7].cpu-{{user,system}}.value)\n\n\
             This function can be used with aggregation functions {}.",
            Statistic::ALL
                .iter()
                .map(|stat| format!("``{stat}``"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        group: COMBINE,
        params: vec![
            FunctionParam::required("seriesList", ParamType::SeriesList),
            FunctionParam::required("func", ParamType::AggFunc)
                .options(available_consolidations()),
            FunctionParam::optional(X_FILES_FACTOR, ParamType::Float),
        ],
        series_change: true,
        name_change: true,
        tags_change: true,
        values_change: true,
    }
}

fn describe_alias(name: &str, stat: Statistic) -> FunctionDescription {
    FunctionDescription {
        name: name.to_owned(),
        function: format!("{name}(*seriesLists)"),
        description: format!(
            "{}\n\nExample:\n\n  &target={name}(company.server.*.threads.busy)\n\n\
             This is an alias for :py:func:`aggregate <aggregate>` with aggregation ``{stat}``.",
            summary(stat),
        ),
        group: COMBINE,
        params: vec![FunctionParam::required("seriesLists", ParamType::SeriesList).multiple()],
        series_change: true,
        name_change: true,
        tags_change: true,
        values_change: true,
    }
}

/// Builds the description of one public name of the family.
pub(super) fn describe(name: &str) -> FunctionDescription {
    let stat = Statistic::from_name(name)
        .or_else(|| name.strip_suffix(SERIES_SUFFIX).and_then(Statistic::from_name));

    match stat {
        Some(stat) => describe_alias(name, stat),
        None => describe_aggregate(),
    }
}
