mod performance;

pub use performance::*;
