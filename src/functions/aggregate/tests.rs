#![allow(clippy::unwrap_used, clippy::float_cmp)]

use super::AGGREGATED_BY;
use crate::{
    context::Context,
    eval::Interpreter,
    series::{MetricRequest, Series, SeriesList, Values},
    Error, Registry, Value,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use test_log::test;

const NAN: Value = Value::NAN;

fn interpreter() -> Interpreter {
    Interpreter::new(Registry::builder().build("").unwrap())
}

fn fetched(entries: Vec<(&str, Vec<Series>)>) -> Values {
    entries
        .into_iter()
        .map(|(pattern, series)| {
            (
                MetricRequest::new(pattern, 0, 1),
                series.into_iter().map(Arc::new).collect(),
            )
        })
        .collect()
}

fn eval(target: &str, values: &Values) -> crate::Result<SeriesList> {
    interpreter().eval_target(&Context::background(), target, 0, 1, values)
}

fn single(target: &str, values: &Values) -> Arc<Series> {
    let mut result = eval(target, values).unwrap();
    assert_eq!(1, result.len(), "{target} should return one series");
    result.remove(0)
}

fn metric(name: &str, values: &[Value]) -> Series {
    Series::new(name, values.to_vec(), 1, 0)
}

fn pair() -> Values {
    fetched(vec![
        ("A", vec![metric("A", &[1.0, 2.0, NAN, 4.0])]),
        ("B", vec![metric("B", &[3.0, NAN, NAN, 8.0])]),
    ])
}

#[test]
fn aggregate_sum_canonical() {
    let values = fetched(vec![(
        "metric[123]",
        vec![
            metric("metric1", &[1.0, 1.0, 1.0]),
            metric("metric2", &[1.0, 1.0, 1.0]),
            metric("metric3", &[1.0, 1.0, 1.0]),
        ],
    )]);

    let result = single("aggregate(metric[123], \"sum\")", &values);

    assert_eq!(vec![3.0, 3.0, 3.0], result.values);
    assert_eq!("sumSeries(metric[123])", result.name);
    assert_eq!("sum", result.tags[AGGREGATED_BY]);
    assert_eq!(1, result.step);
    assert_eq!(0, result.start);
    assert_eq!(3, result.stop);
}

#[test]
fn multiply_series() {
    let values = fetched(vec![
        ("a", vec![metric("a", &[2.0, 3.0, 4.0])]),
        ("b", vec![metric("b", &[10.0, 10.0, 10.0])]),
    ]);

    let result = single("multiplySeries(a, b)", &values);

    assert_eq!(vec![20.0, 30.0, 40.0], result.values);
    assert_eq!("multiplySeries(a, b)", result.name);
    assert_eq!("multiply", result.tags[AGGREGATED_BY]);
}

#[test]
fn stddev_series_is_population() {
    let values = fetched(vec![(
        "m.*",
        vec![
            metric("m.1", &[0.0, 0.0, 0.0]),
            metric("m.2", &[0.0, 0.0, 0.0]),
            metric("m.3", &[10.0, 10.0, 10.0]),
        ],
    )]);

    let result = single("stddevSeries(m.*)", &values);

    for value in &result.values {
        assert!((value - 4.714_045).abs() < 1e-6, "{value}");
    }
}

#[test]
fn diff_series_subtracts_rest_from_first() {
    let values = fetched(vec![
        ("A", vec![metric("A", &[10.0, 20.0, 30.0])]),
        ("B", vec![metric("B", &[1.0, 2.0, 3.0])]),
        ("C", vec![metric("C", &[4.0, 5.0, 6.0])]),
    ]);

    let result = single("diffSeries(A, B, C)", &values);

    assert_eq!(vec![5.0, 13.0, 21.0], result.values);
    assert_eq!("diff", result.tags[AGGREGATED_BY]);
}

#[test]
fn aliases_are_equivalent() {
    let values = pair();

    let avg = single("avg(A,B)", &values);
    let average_series = single("averageSeries(A,B)", &values);
    let aggregate = single("aggregate(group(A,B), \"average\")", &values);
    let aggregate_spelled = single("aggregate(group(A,B), 'avg')", &values);

    for result in [&avg, &average_series, &aggregate, &aggregate_spelled] {
        assert_eq!(2.0, result.values[0]);
        assert_eq!(2.0, result.values[1]);
        assert!(result.values[2].is_nan());
        assert_eq!(6.0, result.values[3]);
        assert_eq!("average", result.tags[AGGREGATED_BY]);
    }

    assert_eq!("averageSeries(A,B)", avg.name);
    assert_eq!("averageSeries(A,B)", average_series.name);
    assert_eq!("averageSeries(group(A,B))", aggregate.name);
    assert_eq!("averageSeries(group(A,B))", aggregate_spelled.name);
}

#[test]
fn alias_spellings_use_canonical_name() {
    let values = pair();

    let total = single("totalSeries(A, B)", &values);
    assert_eq!("sumSeries(A, B)", total.name);
    assert_eq!("sum", total.tags[AGGREGATED_BY]);

    let range = single("rangeOfSeries(A, B)", &values);
    assert_eq!("rangeSeries(A, B)", range.name);
    assert_eq!("range", range.tags[AGGREGATED_BY]);
    assert_eq!(2.0, range.values[0]);
    assert_eq!(0.0, range.values[1]);
}

#[test]
fn x_files_factor_threshold() {
    let values = fetched(vec![(
        "m.*",
        vec![
            metric("m.1", &[1.0, 5.0]),
            metric("m.2", &[1.0, NAN]),
            metric("m.3", &[1.0, NAN]),
            metric("m.4", &[1.0, NAN]),
        ],
    )]);

    let strict = single("aggregate(m.*, 'sum', 0.5)", &values);
    assert_eq!(4.0, strict.values[0]);
    assert!(strict.values[1].is_nan());

    let lax = single("aggregate(m.*, 'sum', 0)", &values);
    assert_eq!(vec![4.0, 5.0], lax.values);

    let unset = single("aggregate(m.*, 'sum')", &values);
    assert_eq!(vec![4.0, 5.0], unset.values);

    let alias = single("sumSeries(m.*)", &values);
    assert_eq!(vec![4.0, 5.0], alias.values);

    let named = single("aggregate(m.*, 'sum', xFilesFactor=0.5)", &values);
    assert!(named.values[1].is_nan());
}

#[test]
fn x_files_factor_inherited_from_series() {
    let values = fetched(vec![(
        "m.*",
        vec![
            metric("m.1", &[1.0, 5.0]),
            metric("m.2", &[1.0, NAN]),
            metric("m.3", &[1.0, NAN]),
            metric("m.4", &[1.0, NAN]),
        ],
    )]);

    let inherited = single("aggregate(setXFilesFactor(m.*, 0.5), 'sum')", &values);
    assert_eq!(4.0, inherited.values[0]);
    assert!(inherited.values[1].is_nan());

    let overridden = single("aggregate(setXFilesFactor(m.*, 0.5), 'sum', 0)", &values);
    assert_eq!(vec![4.0, 5.0], overridden.values);

    // NOTE: The alias forms ignore the factor carried by the series
    let alias = single("sumSeries(setXFilesFactor(m.*, 0.5))", &values);
    assert_eq!(vec![4.0, 5.0], alias.values);
}

#[test]
fn empty_input_is_not_an_error() {
    let values = pair();

    for target in [
        "sum(nope)",
        "sumSeries(nope)",
        "averageSeries(nope, nope.*)",
        "countSeries(nope)",
        "aggregate(nope, 'sum')",
        "aggregate(nope, 'bogus')",
        "aggregate(group(nope), 'average', 0.5)",
    ] {
        assert_eq!(Ok(vec![]), eval(target, &values), "{target}");
    }
}

#[test]
fn unmatched_arguments_are_dropped() {
    let values = pair();

    let result = single("sumSeries(A, nope, B)", &values);

    assert_eq!(4.0, result.values[0]);
    assert_eq!(2.0, result.values[1]);
}

#[test]
fn unknown_statistic() {
    let values = pair();

    assert_eq!(
        Err(Error::UnsupportedConsolidation("bogus".into())),
        eval("aggregate(A, \"bogus\")", &values)
    );
    assert_eq!(
        Err(Error::UnsupportedConsolidation("sumSeries".into())),
        eval("aggregate(A, 'sumSeries')", &values)
    );
}

#[test]
fn aggregate_requires_statistic() {
    let values = pair();

    assert!(matches!(
        eval("aggregate(A)", &values),
        Err(Error::MissingArgument { index: 1, .. })
    ));
    assert!(matches!(
        eval("aggregate(A, 5)", &values),
        Err(Error::ArgumentType { .. })
    ));
    assert!(matches!(
        eval("aggregate(A, B)", &values),
        Err(Error::ArgumentType { .. })
    ));
}

#[test]
fn invalid_x_files_factor() {
    let values = pair();

    assert!(matches!(
        eval("aggregate(A, 'sum', 1.5)", &values),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        eval("aggregate(A, 'sum', 'half')", &values),
        Err(Error::ArgumentType { .. })
    ));
}

#[test]
fn alias_arguments_must_be_series() {
    let values = pair();

    assert!(matches!(
        eval("sumSeries(A, 'sum')", &values),
        Err(Error::ArgumentType { .. })
    ));
    assert!(matches!(
        eval("sum(A, 2)", &values),
        Err(Error::ArgumentType { .. })
    ));
}

#[test]
fn last_takes_last_listed_series() {
    let values = pair();

    let last = single("lastSeries(A, B)", &values);
    assert_eq!(3.0, last.values[0]);
    assert_eq!(2.0, last.values[1]);
    assert!(last.values[2].is_nan());
    assert_eq!(8.0, last.values[3]);

    let reversed = single("lastSeries(B, A)", &values);
    assert_eq!(1.0, reversed.values[0]);
    assert_eq!(4.0, reversed.values[3]);

    let current = single("current(B, A)", &values);
    assert_eq!(reversed.values[0], current.values[0]);
    assert_eq!("last", current.tags[AGGREGATED_BY]);
}

#[test]
fn count_counts_present_values() {
    let values = pair();

    let result = single("countSeries(A, B)", &values);

    assert_eq!(2.0, result.values[0]);
    assert_eq!(1.0, result.values[1]);
    assert!(result.values[2].is_nan());
    assert_eq!(2.0, result.values[3]);
}

#[test]
fn median_min_max() {
    let values = fetched(vec![(
        "m.*",
        vec![
            metric("m.1", &[1.0, 4.0]),
            metric("m.2", &[3.0, 1.0]),
            metric("m.3", &[2.0, 3.0]),
            metric("m.4", &[NAN, 2.0]),
        ],
    )]);

    assert_eq!(vec![2.0, 2.5], single("medianSeries(m.*)", &values).values);
    assert_eq!(vec![1.0, 1.0], single("minSeries(m.*)", &values).values);
    assert_eq!(vec![3.0, 4.0], single("max(m.*)", &values).values);
}

#[test]
fn nested_aggregations() {
    let values = fetched(vec![
        (
            "a.*",
            vec![metric("a.1", &[1.0, 3.0]), metric("a.2", &[3.0, 5.0])],
        ),
        ("b", vec![metric("b", &[10.0, 10.0])]),
    ]);

    let result = single("sumSeries(averageSeries(a.*), b)", &values);

    assert_eq!(vec![12.0, 14.0], result.values);
    assert_eq!("sumSeries(averageSeries(a.*), b)", result.name);
    assert_eq!("sum", result.tags[AGGREGATED_BY]);
}

#[test]
fn fetched_series_are_not_modified() {
    let values = pair();

    single("aggregate(group(A, B), 'sum')", &values);
    single("multiplySeries(A, B)", &values);

    let a = &values[&MetricRequest::new("A", 0, 1)][0];
    assert_eq!("A", a.name);
    assert!(!a.tags.contains_key(AGGREGATED_BY));
    assert_eq!(1.0, a.values[0]);
    assert!(a.values[2].is_nan());
}

#[test]
fn common_tags_survive() {
    let values = fetched(vec![(
        "cpu.*",
        vec![
            metric("cpu;dc=east;host=h-1", &[1.0]),
            metric("cpu;dc=east;host=h-2", &[2.0]),
        ],
    )]);

    let result = single("sumSeries(cpu.*)", &values);

    assert_eq!("cpu", result.tags["name"]);
    assert_eq!("east", result.tags["dc"]);
    assert!(!result.tags.contains_key("host"));
    assert_eq!("sum", result.tags[AGGREGATED_BY]);
}

#[test]
fn cancelled_request() {
    let values = pair();
    let ctx = Context::background();
    ctx.cancel();

    assert_eq!(
        Err(Error::Cancelled),
        interpreter().eval_target(&ctx, "sumSeries(A, B)", 0, 1, &values)
    );
}

#[test]
fn description_covers_every_name() {
    let family = super::new("", &crate::Config::default());
    let descriptions = family
        .first()
        .map(|metadata| metadata.function.description())
        .unwrap();

    assert_eq!(family.len(), descriptions.len());
    for metadata in &family {
        assert!(descriptions.contains_key(&metadata.name), "{}", metadata.name);
    }
}

#[test]
fn alias_ignores_keyword_threshold() {
    let values = pair();

    let plain = single("sumSeries(A, B)", &values);
    let keyword = single("sumSeries(A, B, xFilesFactor=1)", &values);

    assert_eq!(plain.values.len(), keyword.values.len());
    for (a, b) in plain.values.iter().zip(&keyword.values) {
        assert!(a.to_bits() == b.to_bits(), "{a} != {b}");
    }
    assert_eq!(2.0, keyword.values[1]);
}

#[test]
fn tagged_name_target() {
    let values = fetched(vec![(
        "cpu;dc=east",
        vec![
            metric("cpu;dc=east;host=h-1", &[1.0, 2.0]),
            metric("cpu;dc=east;host=h-2", &[3.0, 4.0]),
        ],
    )]);

    let result = single("sumSeries(cpu;dc=east)", &values);

    assert_eq!(vec![4.0, 6.0], result.values);
    assert_eq!("sumSeries(cpu;dc=east)", result.name);
    assert_eq!("east", result.tags["dc"]);
    assert!(!result.tags.contains_key("host"));
}

#[test]
fn builder_settings_reach_the_engine() {
    let registry = Registry::builder()
        .extract_tags_from_args(true)
        .cancellation_interval(1)
        .build("")
        .unwrap();
    let eval = Interpreter::new(registry);

    // Series names carry no tags, only the target text does
    let values = fetched(vec![(
        "cpu;dc=west",
        vec![metric("cpu.1", &[1.0, 2.0]), metric("cpu.2", &[3.0, 4.0])],
    )]);

    let result = eval
        .eval_target(&Context::background(), "aggregate(cpu;dc=west, 'max')", 0, 1, &values)
        .unwrap();

    assert_eq!(1, result.len());
    assert_eq!(vec![3.0, 4.0], result[0].values);
    assert_eq!("west", result[0].tags["dc"]);
    assert_eq!("cpu", result[0].tags["name"]);
    assert_eq!("max", result[0].tags[AGGREGATED_BY]);

    let plain = single("aggregate(cpu;dc=west, 'max')", &values);
    assert!(!plain.tags.contains_key("dc"));

    let long = fetched(vec![(
        "m.*",
        vec![metric("m.1", &vec![1.0; 1_000_000]), metric("m.2", &vec![2.0; 1_000_000])],
    )]);

    // Expires long before a million points are reduced one check at a time
    let ctx = Context::with_deadline(Instant::now() + Duration::from_millis(2));

    assert_eq!(
        Err(Error::Cancelled),
        eval.eval_target(&ctx, "averageSeries(m.*)", 0, 1, &long)
    );
}
