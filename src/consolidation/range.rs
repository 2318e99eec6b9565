use crate::Value;

#[derive(Clone)]
pub struct Range;

impl super::Reducer for Range {
    fn reduce(values: &[Value]) -> Option<Value> {
        let (&first, rest) = values.split_first()?;

        let (min, max) = rest
            .iter()
            .fold((first, first), |(min, max), &x| (min.min(x), max.max(x)));

        Some(max - min)
    }
}
