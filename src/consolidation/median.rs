use crate::Value;

#[derive(Clone)]
pub struct Median;

impl super::Reducer for Median {
    fn reduce(values: &[Value]) -> Option<Value> {
        let mut sorted = values.to_vec();
        sorted.sort_by(Value::total_cmp);

        let mid = sorted.len() / 2;

        if sorted.len() % 2 == 1 {
            sorted.get(mid).copied()
        } else {
            // NOTE: Average the two middle values
            let lo = sorted.get(mid.checked_sub(1)?)?;
            let hi = sorted.get(mid)?;
            Some((lo + hi) / 2.0)
        }
    }
}
