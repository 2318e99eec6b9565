#[derive(Clone)]
pub struct Multiply;

impl super::Reducer for Multiply {
    fn transform(accu: crate::Value, x: crate::Value) -> crate::Value {
        accu * x
    }
}
