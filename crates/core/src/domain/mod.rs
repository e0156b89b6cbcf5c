pub mod asset;
pub mod contract;
