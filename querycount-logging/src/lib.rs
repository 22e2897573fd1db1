use std::io::Write;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

/// 로거 세팅
///
/// `RUST_LOG` 가 설정되어 있으면 기본 레벨 위에 덮어쓴다.
pub fn setup_logger() {
    #[cfg(debug_assertions)]
    {
        Builder::new()
            .filter(None, LevelFilter::Debug)
            .parse_env("RUST_LOG")
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {} {}:{}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .init()
    }

    #[cfg(not(debug_assertions))]
    {
        Builder::new()
            .filter(None, LevelFilter::Info)
            .parse_env("RUST_LOG")
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.args()
                )
            })
            .init();
    }
}
