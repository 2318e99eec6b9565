#[derive(Clone)]
pub struct Sum;

impl super::Reducer for Sum {}
