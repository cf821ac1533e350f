mod data_loader;
mod helpers;

pub use data_loader::DataLoader;
pub use helpers::{round_half_even, percent};
