use log::debug;
use regex::{Regex, RegexBuilder};

use querycount_error::{QueryCountError, Result};

/// 모든 메서드/경로에 매칭되는 패턴
pub const ANY: &str = "";

/// 요청 단위 제외 조건
///
/// 메서드와 경로 패턴이 모두 매칭되고, 해당 요청의 쿼리 수가 `count` 이하인
/// 경우 집계에서 제외된다. 패턴은 대소문자를 구분하지 않으며 문자열 어디에서든
/// 매칭되면 된다.
///
/// 빈 패턴(`ANY`)은 `None` 으로 저장되어 항상 매칭된다.
#[derive(Debug, Clone)]
pub struct QueryCountExclusion {
    method: Option<Regex>,
    path: Option<Regex>,
    count: usize,
}

impl Default for QueryCountExclusion {
    fn default() -> Self {
        Self {
            method: None,
            path: None,
            count: usize::MAX,
        }
    }
}

impl QueryCountExclusion {
    /// 새로운 제외 조건 생성
    pub fn new(path: &str, method: &str, count: usize) -> Result<Self> {
        Ok(Self {
            method: Self::compile(method)?,
            path: Self::compile(path)?,
            count,
        })
    }

    /// 경로 패턴만 지정. 메서드와 쿼리 수는 제한 없음
    pub fn path(path: &str) -> Result<Self> {
        Self::new(path, ANY, usize::MAX)
    }

    /// 제외 적용여부
    pub fn is_excluded(&self, method: &str, path: &str, count: usize) -> bool {
        let excluded = Self::matches(&self.method, method)
            && Self::matches(&self.path, path)
            && count <= self.count;
        if excluded {
            debug!(
                "쿼리 카운트 제외: {method} {path} ({count}개, 패턴 '{}' '{}' <= {})",
                self.method_pattern(),
                self.path_pattern(),
                self.count
            );
        }
        excluded
    }

    pub fn method_pattern(&self) -> &str {
        self.method.as_ref().map_or(ANY, Regex::as_str)
    }

    pub fn path_pattern(&self) -> &str {
        self.path.as_ref().map_or(ANY, Regex::as_str)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn matches(pattern: &Option<Regex>, subject: &str) -> bool {
        pattern.as_ref().is_none_or(|regex| regex.is_match(subject))
    }

    fn compile(pattern: &str) -> Result<Option<Regex>> {
        if pattern == ANY {
            return Ok(None);
        }
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|e| QueryCountError::Pattern(format!("정규식 컴파일 실패 '{pattern}': {e}")))
    }
}
