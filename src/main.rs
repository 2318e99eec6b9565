use graphagg::{Context, Interpreter, MetricRequest, Registry, Series, Value, Values};
use std::{sync::Arc, time::Instant};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const METRIC: &str = "servers.*.cpu.total";
const POINTS: usize = 1_000_000;
const STEP: i64 = 10;

const DEFAULT_TARGETS: &[&str] = &[
    "sumSeries(servers.*.cpu.total)",
    "aggregate(servers.*.cpu.total, 'avg')",
    "aggregate(servers.*.cpu.total, 'median', 0.5)",
    "rangeOfSeries(servers.*.cpu.total)",
    "aggregate(setXFilesFactor(servers.*.cpu.total, 0.9), 'max')",
    "diffSeries(maxSeries(servers.*.cpu.total), minSeries(servers.*.cpu.total))",
];

fn main() -> graphagg::Result<()> {
    env_logger::builder()
        .filter_module("graphagg", log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    let start = Instant::now();

    let mut series = vec![];

    {
        use rand::Rng;

        let mut rng = rand::thread_rng();

        for host in ["h-0", "h-1", "h-2"] {
            let values = (0..POINTS)
                .map(|idx| {
                    // Drop roughly one in twenty points
                    if rng.gen_ratio(1, 20) {
                        return Value::NAN;
                    }

                    let base_value: Value = if idx < 10_000 {
                        10.0 // Low load
                    } else {
                        75.0 // High load
                    };

                    (base_value + rng.gen_range(-5.0..5.0)).max(0.0)
                })
                .collect();

            series.push(Arc::new(Series::new(
                format!("servers.{host}.cpu.total"),
                values,
                STEP,
                0,
            )));
        }
    }

    log::info!("generated {} series in {:?}", series.len(), start.elapsed());

    let until = POINTS as i64 * STEP;

    let mut values = Values::default();
    values.insert(MetricRequest::new(METRIC, 0, until), series);

    let registry = Registry::builder().build("")?;
    log::info!("registered {} functions", registry.len());

    let eval = Interpreter::new(registry);
    let ctx = Context::background();

    let targets = std::env::args().skip(1).collect::<Vec<_>>();
    let targets = if targets.is_empty() {
        DEFAULT_TARGETS.iter().map(ToString::to_string).collect()
    } else {
        targets
    };

    for target in &targets {
        log::info!("evaluating: {target:?}");

        let start = Instant::now();
        let result = eval.eval_target(&ctx, target, 0, until, &values)?;
        log::info!("done in {:?}", start.elapsed());

        for series in &result {
            let head = series.values.iter().take(5).collect::<Vec<_>>();
            log::info!("{} {:?} {head:?}", series.name, series.tags);
        }
    }

    Ok(())
}
