pub mod contract;
pub mod error;
pub mod queries;
pub mod state;
pub mod utils;

pub mod migration;
