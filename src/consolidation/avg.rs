use crate::Value;

#[derive(Clone)]
pub struct Average;

impl super::Reducer for Average {
    fn finish(accu: Value, len: usize) -> Value {
        accu / len as Value
    }
}
