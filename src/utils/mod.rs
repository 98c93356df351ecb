pub mod datastruct;
pub mod math;
pub mod normalizer;
pub mod scaler;
pub mod sort;
