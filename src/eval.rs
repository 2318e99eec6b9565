use crate::{
    context::Context,
    expr::{Call, Expr},
    registry::Registry,
    series::{MetricRequest, SeriesList, Values},
    Error,
};

/// Resolves expression nodes into series.
///
/// Functions receive the evaluator so they can resolve their own arguments,
/// which may themselves be nested calls.
pub trait Evaluator {
    /// Evaluates one expression node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node (or any node below it) fails to evaluate.
    fn eval(
        &self,
        ctx: &Context,
        expr: &Expr,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList>;
}

/// Resolves one argument into a series list.
///
/// A pattern that matched nothing resolves to an empty list.
///
/// # Errors
///
/// Returns [`Error::ArgumentType`] if the argument is a literal.
pub fn get_series_arg(
    ctx: &Context,
    eval: &dyn Evaluator,
    arg: &Expr,
    from: i64,
    until: i64,
    values: &Values,
) -> crate::Result<SeriesList> {
    match arg {
        Expr::Name(_) | Expr::Call(_) => eval.eval(ctx, arg, from, until, values),
        Expr::Const(_) | Expr::Str(_) => Err(Error::ArgumentType {
            arg: arg.to_string(),
            expected: "series list",
        }),
    }
}

/// Resolves every positional argument as a series list and concatenates
/// them in order, skipping arguments that matched nothing.
///
/// # Errors
///
/// Returns an error if any argument fails to resolve.
pub fn get_series_args_and_remove_non_existing(
    ctx: &Context,
    eval: &dyn Evaluator,
    call: &Call,
    from: i64,
    until: i64,
    values: &Values,
) -> crate::Result<SeriesList> {
    let mut result = vec![];

    for arg in call.args() {
        let series = get_series_arg(ctx, eval, arg, from, until, values)?;

        if series.is_empty() {
            log::trace!("{arg} did not match any series");
            continue;
        }

        result.extend(series);
    }

    Ok(result)
}

/// Evaluates expression trees against already-fetched series,
/// dispatching calls through a [`Registry`].
pub struct Interpreter {
    registry: Registry,
}

impl Interpreter {
    /// Creates an interpreter over the given functions.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// The functions this interpreter dispatches to.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parses and evaluates a textual target.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is malformed or fails to evaluate.
    pub fn eval_target(
        &self,
        ctx: &Context,
        target: &str,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList> {
        let expr = Expr::parse(target)?;
        self.eval(ctx, &expr, from, until, values)
    }
}

impl Evaluator for Interpreter {
    fn eval(
        &self,
        ctx: &Context,
        expr: &Expr,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList> {
        ctx.check()?;

        match expr {
            Expr::Name(metric) => {
                let request = MetricRequest::new(metric.as_str(), from, until);

                Ok(values.get(&request).cloned().unwrap_or_else(|| {
                    log::debug!("{metric} [{from}..{until}] did not match any series");
                    vec![]
                }))
            }
            Expr::Call(call) => {
                let Some(function) = self.registry.get(call.target()) else {
                    return Err(Error::UnknownFunction(call.target().to_owned()));
                };

                log::trace!("evaluating {call}");
                function.evaluate(ctx, self, call, from, until, values)
            }
            Expr::Const(_) | Expr::Str(_) => Err(Error::ArgumentType {
                arg: expr.to_string(),
                expected: "series list",
            }),
        }
    }
}
