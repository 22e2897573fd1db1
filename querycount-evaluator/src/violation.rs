use std::fmt;

/// 허용치를 넘은 테스트 케이스/API 호출
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub test_case_id: String,
    pub method: String,
    pub path: String,
    /// 허용 쿼리 수
    pub threshold: i64,
    /// 현재 쿼리 수
    pub total: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "In test case {}, {} {}. Expected at most {} queries but got {} queries",
            self.test_case_id, self.method, self.path, self.threshold, self.total
        )
    }
}
