use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use querycount_error::{QueryCountError, Result};

use crate::checkconfig::{CheckConfig, ReportConfig};
use crate::config::CounterConfig;

/// 설정파일 경로. `QUERYCOUNT_CONFIG` 환경변수로 변경 가능
pub static CONFIG_PATH: Lazy<String> = Lazy::new(|| {
    std::env::var("QUERYCOUNT_CONFIG").unwrap_or_else(|_| "querycount.yml".to_string())
});

/// 통합 세팅 인스턴스
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub counter: CounterConfig,
    pub check: CheckConfig,
    pub report: ReportConfig,
}

impl Settings {
    /// Setting 생성
    pub fn new() -> Result<Self> {
        Self::load(CONFIG_PATH.as_str())
    }

    /// 지정 경로에서 로드. 파일이 없으면 기본설정 사용
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // yml 파일 유무 확인
        if path.exists() {
            info!("설정파일 로드: {}", path.display());
            match Self::from_file(path) {
                Ok(settings) => Ok(settings),
                Err(e) => Err(QueryCountError::Config(format!(
                    "설정파일 로드 실패 ({}): {}",
                    path.display(),
                    e
                ))),
            }
        } else {
            // 기본설정사용
            info!("기본설정 사용");
            Ok(Self::default())
        }
    }

    /// 설정파일에서 설정 로드
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let settings = serde_yml::from_str(&contents)?;

        Ok(settings)
    }
}
