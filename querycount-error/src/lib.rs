use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::PoisonError;

use regex::Error as RegexError;
use serde_json::Error as JsonError;
use serde_yml::Error as YmlError;

/// 쿼리 카운터의 모든 에러 타입을 정의합니다.
#[derive(Debug)]
pub enum QueryCountError {
    /// 설정 관련 에러
    Config(String),

    /// 파일 입출력 에러
    Io(io::Error),

    /// JSON 리포트 파싱/직렬화 에러
    Json(String),

    /// 제외 규칙 정규식 에러
    Pattern(String),

    /// HTML 리포트 생성 에러
    Report(String),

    /// 내부 상태 관련 에러
    Internal(String),

    /// 기타 에러
    Other(String),
}

impl fmt::Display for QueryCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryCountError::Config(msg) => write!(f, "설정 에러: {}", msg),
            QueryCountError::Io(err) => write!(f, "I/O 에러: {}", err),
            QueryCountError::Json(msg) => write!(f, "JSON 에러: {}", msg),
            QueryCountError::Pattern(msg) => write!(f, "패턴 에러: {}", msg),
            QueryCountError::Report(msg) => write!(f, "리포트 에러: {}", msg),
            QueryCountError::Internal(msg) => write!(f, "내부 에러: {}", msg),
            QueryCountError::Other(msg) => write!(f, "기타 에러: {}", msg),
        }
    }
}

impl StdError for QueryCountError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            QueryCountError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Result 타입 별칭 정의
pub type Result<T> = std::result::Result<T, QueryCountError>;

/// From 트레이트 구현으로 다양한 에러 타입을 QueryCountError로 변환
impl From<io::Error> for QueryCountError {
    fn from(err: io::Error) -> Self {
        QueryCountError::Io(err)
    }
}

impl From<JsonError> for QueryCountError {
    fn from(err: JsonError) -> Self {
        QueryCountError::Json(format!("JSON 파싱 에러: {}", err))
    }
}

impl From<YmlError> for QueryCountError {
    fn from(err: YmlError) -> Self {
        QueryCountError::Config(format!("YAML 파싱 에러: {}", err))
    }
}

impl From<RegexError> for QueryCountError {
    fn from(err: RegexError) -> Self {
        QueryCountError::Pattern(format!("정규식 컴파일 에러: {}", err))
    }
}

impl<T> From<PoisonError<T>> for QueryCountError {
    fn from(err: PoisonError<T>) -> Self {
        QueryCountError::Internal(format!("락 포이즌 에러: {}", err))
    }
}

impl From<String> for QueryCountError {
    fn from(err: String) -> Self {
        QueryCountError::Other(err)
    }
}

impl From<&str> for QueryCountError {
    fn from(err: &str) -> Self {
        QueryCountError::Other(err.to_string())
    }
}

/// 에러 처리 유틸리티 함수
pub fn config_err<E: fmt::Display>(err: E) -> QueryCountError {
    QueryCountError::Config(format!("{}", err))
}

pub fn json_err<E: fmt::Display>(err: E) -> QueryCountError {
    QueryCountError::Json(format!("{}", err))
}

pub fn report_err<E: fmt::Display>(err: E) -> QueryCountError {
    QueryCountError::Report(format!("{}", err))
}
