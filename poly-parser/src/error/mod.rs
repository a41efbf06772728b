pub mod kind;

pub use poly_error::Error;
