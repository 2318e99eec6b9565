use crate::Value;

/// Population standard deviation
#[derive(Clone)]
pub struct Stddev;

impl super::Reducer for Stddev {
    fn reduce(values: &[Value]) -> Option<Value> {
        if values.is_empty() {
            return None;
        }

        let len = values.len() as Value;
        let mean = values.iter().sum::<Value>() / len;

        let variance = values
            .iter()
            .map(|x| {
                let d = x - mean;
                d * d
            })
            .sum::<Value>()
            / len;

        Some(variance.sqrt())
    }
}
