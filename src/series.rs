use crate::{tags::extract_tags, HashMap, Value};
use std::sync::Arc;

/// A list of series, shared read-only between the nodes of one expression tree.
pub type SeriesList = Vec<Arc<Series>>;

/// Already-fetched series, keyed by the request that produced them.
pub type Values = HashMap<MetricRequest, SeriesList>;

/// Identifies one fetch of a metric pattern over a time range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetricRequest {
    /// Metric pattern as written in the target (e.g. `host.*.cpu`)
    pub metric: String,

    /// Start of the requested range (seconds since epoch)
    pub from: i64,

    /// End of the requested range (seconds since epoch)
    pub until: i64,
}

impl MetricRequest {
    /// Creates a new request key.
    pub fn new<S: Into<String>>(metric: S, from: i64, until: i64) -> Self {
        Self {
            metric: metric.into(),
            from,
            until,
        }
    }
}

/// One evenly sampled time series over `[start, stop)`.
///
/// Missing samples are stored as `NaN`.
/// A series is never modified once it has been handed to another stage;
/// transformations build new series instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Display name
    pub name: String,

    /// Samples, one per `step`
    pub values: Vec<Value>,

    /// First timestamp (inclusive)
    pub start: i64,

    /// Last timestamp (exclusive)
    pub stop: i64,

    /// Sampling interval in seconds
    pub step: i64,

    /// Minimum fraction of present inputs for an aggregate point to be valid
    pub x_files_factor: f32,

    /// Identity and derivation tags
    pub tags: HashMap<String, String>,
}

impl Series {
    /// Builds a series from samples starting at `start`, spaced by `step`.
    ///
    /// Tags are derived from the name (see [`crate::tags::extract_tags`]).
    #[must_use]
    pub fn new<S: Into<String>>(name: S, values: Vec<Value>, step: i64, start: i64) -> Self {
        let name = name.into();
        let stop = start + values.len() as i64 * step;
        let tags = extract_tags(&name);

        Self {
            name,
            values,
            start,
            stop,
            step,
            x_files_factor: 0.0,
            tags,
        }
    }

    /// Attaches a tag.
    #[must_use]
    pub fn with_tag<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_tag(key, value);
        self
    }

    /// Sets the completeness threshold.
    #[must_use]
    pub fn with_x_files_factor(mut self, x_files_factor: f32) -> Self {
        self.x_files_factor = x_files_factor;
        self
    }

    /// Attaches a tag to a series that is still being built.
    pub fn set_tag<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.tags.insert(key.into(), value.into());
    }

    /// Copies the series under a new name, keeping its tags.
    #[must_use]
    pub fn copy_with_name<S: Into<String>>(&self, name: S) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the sample at `idx`, or `None` if it is missing.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Value> {
        self.values.get(idx).copied().filter(|x| !x.is_nan())
    }
}

/// Returns the tags that have the same value in every series.
#[must_use]
pub fn common_tags(series: &[Arc<Series>]) -> HashMap<String, String> {
    let Some((first, rest)) = series.split_first() else {
        return HashMap::default();
    };

    first
        .tags
        .iter()
        .filter(|(key, value)| {
            rest.iter()
                .all(|other| other.tags.get(key.as_str()) == Some(*value))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn series_bounds() {
        let series = Series::new("metric1", vec![1.0, 2.0, 3.0], 60, 600);

        assert_eq!(600, series.start);
        assert_eq!(780, series.stop);
        assert_eq!(3, series.len());
        assert_eq!(
            series.len() as i64,
            (series.stop - series.start) / series.step
        );
        assert_eq!("metric1", series.tags["name"]);
    }

    #[test]
    fn series_get_missing() {
        let series = Series::new("metric1", vec![1.0, Value::NAN], 1, 0);

        assert_eq!(Some(1.0), series.get(0));
        assert_eq!(None, series.get(1));
        assert_eq!(None, series.get(2));
    }

    #[test]
    fn series_with_tag() {
        let series = Series::new("cpu;dc=east", vec![], 1, 0).with_tag("host", "h-1");

        assert_eq!("cpu", series.tags["name"]);
        assert_eq!("east", series.tags["dc"]);
        assert_eq!("h-1", series.tags["host"]);
    }

    #[test]
    fn copy_keeps_source() {
        let source = Series::new("a", vec![1.0], 1, 0);
        let copy = source.copy_with_name("b");

        assert_eq!("a", source.name);
        assert_eq!("b", copy.name);
        assert_eq!(source.values, copy.values);
    }

    #[test]
    fn common_tags_intersect() {
        let a = Arc::new(
            Series::new("cpu;dc=east;host=h-1", vec![], 1, 0).with_tag("env", "prod"),
        );
        let b = Arc::new(Series::new("cpu;dc=east;host=h-2", vec![], 1, 0));

        let tags = common_tags(&[a, b]);

        assert_eq!(2, tags.len());
        assert_eq!("cpu", tags["name"]);
        assert_eq!("east", tags["dc"]);
    }

    #[test]
    fn common_tags_empty() {
        assert!(common_tags(&[]).is_empty());
    }
}
