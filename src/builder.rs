use crate::{config::Config, functions, Registry};

/// Builder for [`Registry`].
pub struct Builder {
    config: Config,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// If `true`, aggregations recover tags from their textual arguments.
    ///
    /// Default = false
    #[must_use]
    pub fn extract_tags_from_args(mut self, enabled: bool) -> Self {
        self.config.extract_tags_from_args = enabled;
        self
    }

    /// Sets how many output points are computed between cancellation checks.
    ///
    /// Default = 4096
    #[must_use]
    pub fn cancellation_interval(mut self, points: usize) -> Self {
        self.config.cancellation_interval = points.max(1);
        self
    }

    /// Registers the default function families.
    ///
    /// `config_file` is handed to every family; the families in this crate
    /// do not read it.
    ///
    /// # Errors
    ///
    /// Returns error if two families claim the same public name.
    pub fn build(self, config_file: &str) -> crate::Result<Registry> {
        let mut registry = Registry::default();

        registry.register(functions::aggregate::new(config_file, &self.config))?;
        registry.register(functions::group::new(config_file, &self.config))?;
        registry.register(functions::set_x_files_factor::new(
            config_file,
            &self.config,
        ))?;

        log::debug!("registered {} functions", registry.len());

        Ok(registry)
    }
}
