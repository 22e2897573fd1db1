use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// 수집된 DB 쿼리 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub sql: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<Vec<StackFrame>>,
    /// 실행 시간(초). 문자열(`"0.001"`)로 기록된 리포트도 읽는다
    #[serde(default, deserialize_with = "deserialize_time")]
    pub time: f64,
}

impl QueryRecord {
    pub fn new(sql: impl Into<String>, time: f64) -> Self {
        Self {
            sql: sql.into(),
            stacktrace: None,
            time,
        }
    }

    #[must_use]
    pub fn with_stacktrace(mut self, stacktrace: Vec<StackFrame>) -> Self {
        self.stacktrace = Some(stacktrace);
        self
    }

    /// 스택트레이스 제거
    #[must_use]
    pub fn without_stacktrace(mut self) -> Self {
        self.stacktrace = None;
        self
    }
}

fn deserialize_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Time {
        Seconds(f64),
        Text(String),
    }

    match Time::deserialize(deserializer)? {
        Time::Seconds(time) => Ok(time),
        Time::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// 쿼리를 발생시킨 호출 위치
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    pub file: String,
    pub function: String,
    pub line: u32,
}

impl StackFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }
}

/// API 호출 키 (HTTP 메서드, 경로)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiCall {
    pub method: String,
    pub path: String,
}

impl ApiCall {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// 요청 식별자. 같은 요청이 두 번 기록되는 것을 막는다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);
