/// Subtracts every following value from the first one.
#[derive(Clone)]
pub struct Diff;

impl super::Reducer for Diff {
    fn transform(accu: crate::Value, x: crate::Value) -> crate::Value {
        accu - x
    }
}
