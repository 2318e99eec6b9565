use crate::{
    context::Context,
    eval::Evaluator,
    expr::Call,
    series::{SeriesList, Values},
    HashMap,
};
use std::sync::Arc;

/// A transformation function that can be plugged into an [`Evaluator`].
///
/// Implementations are stateless per request and shared between threads.
pub trait Function: Send + Sync {
    /// Evaluates `call`, whose arguments are resolved through `eval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are malformed or the context was cancelled.
    fn evaluate(
        &self,
        ctx: &Context,
        eval: &dyn Evaluator,
        call: &Call,
        from: i64,
        until: i64,
        values: &Values,
    ) -> crate::Result<SeriesList>;

    /// Describes every public name this function is registered under.
    fn description(&self) -> HashMap<String, FunctionDescription>;
}

/// A public name and the function serving it, as returned by a family's `new`.
#[derive(Clone)]
pub struct FunctionMetadata {
    /// Public name
    pub name: String,

    /// Shared implementation
    pub function: Arc<dyn Function>,
}

impl std::fmt::Debug for FunctionMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionMetadata")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Type of a function parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamType {
    /// One or more series
    SeriesList,

    /// Name of a consolidation function
    AggFunc,

    /// Floating point number
    Float,

    /// Integer
    Integer,

    /// Quoted string
    String,

    /// `true` or `false`
    Boolean,
}

/// A function parameter, for documentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionParam {
    /// Parameter name
    pub name: &'static str,

    /// Parameter type
    pub kind: ParamType,

    /// Whether the parameter must be given
    pub required: bool,

    /// Whether the parameter is variadic
    pub multiple: bool,

    /// Suggested values
    pub options: Vec<&'static str>,
}

impl FunctionParam {
    /// A required, single parameter.
    #[must_use]
    pub fn required(name: &'static str, kind: ParamType) -> Self {
        Self {
            name,
            kind,
            required: true,
            multiple: false,
            options: vec![],
        }
    }

    /// An optional, single parameter.
    #[must_use]
    pub fn optional(name: &'static str, kind: ParamType) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Marks the parameter as variadic.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets the suggested values.
    #[must_use]
    pub fn options(mut self, options: Vec<&'static str>) -> Self {
        self.options = options;
        self
    }
}

/// Introspection record of one public function name.
///
/// Never consulted during evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FunctionDescription {
    /// Public name
    pub name: String,

    /// Signature, e.g. `sumSeries(*seriesLists)`
    pub function: String,

    /// Human readable text
    pub description: String,

    /// Documentation group, e.g. `Combine`
    pub group: &'static str,

    /// Parameters
    pub params: Vec<FunctionParam>,

    /// Changes the number of series
    pub series_change: bool,

    /// Changes series names
    pub name_change: bool,

    /// Changes tags
    pub tags_change: bool,

    /// Changes values
    pub values_change: bool,
}
