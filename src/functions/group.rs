//! `group(*seriesLists)`

use super::COMBINE;
use crate::{
    config::Config,
    context::Context,
    eval::{get_series_args_and_remove_non_existing, Evaluator},
    expr::Call,
    function::{Function, FunctionDescription, FunctionMetadata, FunctionParam, ParamType},
    series::{SeriesList, Values},
    HashMap,
};
use std::sync::Arc;

const GROUP: &str = "group";

/// Concatenates its arguments into one series list.
pub struct Group;

impl Function for Group {
    fn evaluate(
        &self,
        ctx: &Context,
        eval: &dyn Evaluator,
        call: &Call,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList> {
        get_series_args_and_remove_non_existing(ctx, eval, call, from, until, values)
    }

    fn description(&self) -> HashMap<String, FunctionDescription> {
        let mut map = HashMap::default();

        map.insert(
            GROUP.to_owned(),
            FunctionDescription {
                name: GROUP.to_owned(),
                function: format!("{GROUP}(*seriesLists)"),
                description: "Takes an arbitrary number of seriesLists and adds them to a single seriesList. \
                              This is used to pass multiple seriesLists to a function which only takes one."
                    .to_owned(),
                group: COMBINE,
                params: vec![FunctionParam::required("seriesLists", ParamType::SeriesList).multiple()],
                series_change: false,
                name_change: false,
                tags_change: false,
                values_change: false,
            },
        );

        map
    }
}

/// Registers `group`.
#[must_use]
pub fn new(_config_file: &str, _config: &Config) -> Vec<FunctionMetadata> {
    vec![FunctionMetadata {
        name: GROUP.to_owned(),
        function: Arc::new(Group),
    }]
}
