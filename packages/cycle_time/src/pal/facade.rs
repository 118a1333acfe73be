mod cycle_source;

pub(crate) use cycle_source::*;
