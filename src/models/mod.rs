pub mod activation;
pub mod auth;
pub mod company;

pub use activation::*;
pub use auth::*;
pub use company::*;
