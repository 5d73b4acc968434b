pub mod product;

pub use product::{validate_product, Product};
