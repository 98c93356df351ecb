pub mod tf;
pub mod idf;
pub mod serde;

pub use tf::TFVector;
pub use tf::TFVectorTrait;
pub use idf::IDFVector;