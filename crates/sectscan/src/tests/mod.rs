mod scenarios;
pub mod utils;
