//! Function families. Each family exposes
//! `new(config_file, config) -> Vec<FunctionMetadata>`.

pub mod aggregate;
pub mod group;
pub mod set_x_files_factor;

use crate::{Error, Value};

/// Documentation group of functions that combine series
const COMBINE: &str = "Combine";

/// Name of the completeness threshold argument
const X_FILES_FACTOR: &str = "xFilesFactor";

/// Checks that a completeness threshold lies in `[0, 1]`.
#[allow(clippy::cast_possible_truncation)]
fn x_files_factor(value: Value) -> crate::Result<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value as f32)
    } else {
        Err(Error::InvalidArgument(format!(
            "{X_FILES_FACTOR} must be between 0 and 1, got {value}"
        )))
    }
}
