use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 쿼리 수집 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// 수집 활성화 여부. 비활성화 시 모든 수집 호출이 무시된다
    pub enable: bool,
    /// 쿼리별 스택트레이스 보존 여부
    pub enable_stacktraces: bool,
    /// 상세 리포트 경로 (쿼리 목록 포함)
    pub detail_path: String,
    /// 요약 리포트 경로 (카운트만)
    pub summary_path: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterConfig {
    /// 기본설정으로 생성
    #[must_use]
    pub fn new() -> Self {
        Self {
            enable: true,
            enable_stacktraces: true,
            detail_path: "reports/query_count_detail.json".to_string(),
            summary_path: "reports/query_count.json".to_string(),
        }
    }

    /// 비활성화된 설정
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable: false,
            ..Self::new()
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        PathBuf::from(&self.summary_path)
    }

    pub fn detail_path(&self) -> PathBuf {
        PathBuf::from(&self.detail_path)
    }
}
