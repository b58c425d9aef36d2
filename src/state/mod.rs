pub mod activation;
pub mod pending;

pub use activation::*;
pub use pending::*;
