#[derive(Clone)]
pub struct Max;

impl super::Reducer for Max {
    fn transform(accu: crate::Value, x: crate::Value) -> crate::Value {
        accu.max(x)
    }
}
