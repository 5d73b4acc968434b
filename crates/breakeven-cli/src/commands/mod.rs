pub mod analysis;
pub mod expenses;
pub mod export;
