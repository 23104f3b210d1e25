pub mod consts;
mod model;

pub use model::{AstGrepConfig, Config, LimitsConfig, ReadConfig};
