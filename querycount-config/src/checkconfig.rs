use serde::{Deserialize, Serialize};

/// 기준 리포트 비교 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// 허용 증가율 (퍼센트)
    pub threshold: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            threshold: 10.0,
        }
    }
}

/// HTML 리포트 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 출력 디렉토리
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "reports".to_string(),
        }
    }
}
