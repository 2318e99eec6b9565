//! Argument-typed expression tree of a render target.

mod parser;

use crate::{Error, HashMap, Value};

/// One node of a target expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Metric pattern, e.g. `host.*.cpu` or `metric[123]`
    Name(String),

    /// Numeric literal
    Const(Value),

    /// Quoted string literal
    Str(String),

    /// Function call
    Call(Call),
}

impl Expr {
    /// Parses a target expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExpression`] if the target is malformed.
    pub fn parse(target: &str) -> crate::Result<Self> {
        parser::parse_target(target)
    }

    /// Returns the call if this node is one.
    #[must_use]
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "series name",
            Self::Const(_) => "number",
            Self::Str(_) => "string",
            Self::Call(_) => "function call",
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Const(value) => write!(f, "{value}"),
            // NOTE: A parsed string never holds both quote characters
            Self::Str(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Call(call) => write!(f, "{call}"),
        }
    }
}

/// A function call node.
///
/// `raw_args` keeps the argument text as written, it is what the call
/// displays as (and thus what derived series get named after).
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    target: String,
    args: Vec<Expr>,
    named_args: HashMap<String, Expr>,
    raw_args: String,
}

impl Call {
    /// Builds a call from positional arguments, rendering its argument text.
    #[must_use]
    pub fn new<S: Into<String>>(target: S, args: Vec<Expr>) -> Self {
        let raw_args = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            target: target.into(),
            args,
            named_args: HashMap::default(),
            raw_args,
        }
    }

    pub(crate) fn from_parts(
        target: String,
        args: Vec<Expr>,
        named_args: HashMap<String, Expr>,
        raw_args: String,
    ) -> Self {
        Self {
            target,
            args,
            named_args,
            raw_args,
        }
    }

    /// Function name as invoked.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Rewrites the displayed function name.
    pub fn set_target<S: Into<String>>(&mut self, target: S) {
        self.target = target.into();
    }

    /// Argument text as displayed.
    #[must_use]
    pub fn raw_args(&self) -> &str {
        &self.raw_args
    }

    /// Rewrites the displayed argument text.
    pub fn set_raw_args<S: Into<String>>(&mut self, raw_args: S) {
        self.raw_args = raw_args.into();
    }

    /// Positional arguments.
    #[must_use]
    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// Positional argument at `idx`.
    #[must_use]
    pub fn arg(&self, idx: usize) -> Option<&Expr> {
        self.args.get(idx)
    }

    /// Keyword argument, e.g. `xFilesFactor=0.5`.
    #[must_use]
    pub fn named_arg(&self, name: &str) -> Option<&Expr> {
        self.named_args.get(name)
    }

    /// Returns `true` if any keyword argument was given.
    #[must_use]
    pub fn has_named_args(&self) -> bool {
        !self.named_args.is_empty()
    }

    /// Reads positional argument `idx` as a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] if there is no such argument,
    /// or [`Error::ArgumentType`] if it is not a string.
    pub fn get_string_arg(&self, idx: usize) -> crate::Result<&str> {
        match self.arg(idx) {
            Some(Expr::Str(s)) => Ok(s),
            Some(other) => {
                log::trace!("argument #{idx} of {} is a {}", self.target, other.type_name());
                Err(Error::ArgumentType {
                    arg: format!("#{idx}"),
                    expected: "string",
                })
            }
            None => Err(Error::MissingArgument {
                function: self.target.clone(),
                index: idx,
            }),
        }
    }

    /// Reads a number given either at position `idx` or as keyword `name`,
    /// falling back to `default` if neither is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentType`] if the argument is not a number.
    pub fn get_float_arg_default(
        &self,
        idx: usize,
        name: &str,
        default: Value,
    ) -> crate::Result<Value> {
        match self.arg(idx).or_else(|| self.named_arg(name)) {
            Some(Expr::Const(value)) => Ok(*value),
            Some(_) => Err(Error::ArgumentType {
                arg: name.to_owned(),
                expected: "number",
            }),
            None => Ok(default),
        }
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.target, self.raw_args)
    }
}
