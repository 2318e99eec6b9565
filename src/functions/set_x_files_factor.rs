//! `setXFilesFactor(seriesList, xFilesFactor)`, short alias `xFilesFactor`

use super::{x_files_factor, X_FILES_FACTOR};
use crate::{
    config::Config,
    context::Context,
    eval::{get_series_arg, Evaluator},
    expr::Call,
    function::{Function, FunctionDescription, FunctionMetadata, FunctionParam, ParamType},
    series::{SeriesList, Values},
    Error, HashMap,
};
use std::sync::Arc;

const SET_X_FILES_FACTOR: &str = "setXFilesFactor";

/// Returns copies of a series list carrying a new completeness threshold.
pub struct SetXFilesFactor;

impl Function for SetXFilesFactor {
    fn evaluate(
        &self,
        ctx: &Context,
        eval: &dyn Evaluator,
        call: &Call,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList> {
        let arg = call.arg(0).ok_or_else(|| Error::MissingArgument {
            function: call.target().to_owned(),
            index: 0,
        })?;

        if call.arg(1).is_none() && call.named_arg(X_FILES_FACTOR).is_none() {
            return Err(Error::MissingArgument {
                function: call.target().to_owned(),
                index: 1,
            });
        }

        let xff = x_files_factor(call.get_float_arg_default(1, X_FILES_FACTOR, 0.0)?)?;

        let series = get_series_arg(ctx, eval, arg, from, until, values)?;

        Ok(series
            .iter()
            .map(|series| {
                let copy = (**series)
                    .clone()
                    .with_x_files_factor(xff)
                    .with_tag(X_FILES_FACTOR, xff.to_string());
                Arc::new(copy)
            })
            .collect())
    }

    fn description(&self) -> HashMap<String, FunctionDescription> {
        [SET_X_FILES_FACTOR, X_FILES_FACTOR]
            .into_iter()
            .map(|name| {
                let description = FunctionDescription {
                    name: name.to_owned(),
                    function: format!("{name}(seriesList, {X_FILES_FACTOR})"),
                    description: "Short form: xFilesFactor()\n\n\
                                  Takes one metric or a wildcard seriesList and an xFilesFactor value between 0 and 1. \
                                  When a series needs to be consolidated, this sets the fraction of values \
                                  in an interval that must not be null for the consolidation to be considered valid."
                        .to_owned(),
                    group: "Transform",
                    params: vec![
                        FunctionParam::required("seriesList", ParamType::SeriesList),
                        FunctionParam::required(X_FILES_FACTOR, ParamType::Float),
                    ],
                    series_change: false,
                    name_change: false,
                    tags_change: true,
                    values_change: false,
                };
                (name.to_owned(), description)
            })
            .collect()
    }
}

/// Registers `setXFilesFactor` and its short alias, served by one shared instance.
#[must_use]
pub fn new(_config_file: &str, _config: &Config) -> Vec<FunctionMetadata> {
    let function = Arc::new(SetXFilesFactor);

    [SET_X_FILES_FACTOR, X_FILES_FACTOR]
        .into_iter()
        .map(|name| FunctionMetadata {
            name: name.to_owned(),
            function: function.clone(),
        })
        .collect()
}
