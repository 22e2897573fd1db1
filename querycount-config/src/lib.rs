pub mod setting;
pub mod config;
pub mod checkconfig;

pub use setting::{Settings, CONFIG_PATH};
pub use config::CounterConfig;
pub use checkconfig::{CheckConfig, ReportConfig};
