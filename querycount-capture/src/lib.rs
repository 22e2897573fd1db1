pub mod local;
pub mod manager;
pub mod query_log;
pub mod request;

pub use manager::QueryCountManager;
pub use query_log::QueryLog;
pub use request::RequestCapture;
