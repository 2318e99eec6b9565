/// Settings shared by every function family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Recover tags from the textual arguments of aggregations
    /// (e.g. the terms of `seriesByTag(...)`).
    ///
    /// Default = false
    pub extract_tags_from_args: bool,

    /// Number of output points computed between two cancellation checks.
    ///
    /// Default = 4096
    pub cancellation_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extract_tags_from_args: false,
            cancellation_interval: 4_096,
        }
    }
}
