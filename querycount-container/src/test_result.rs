use std::collections::BTreeMap;

use log::debug;

use crate::report::QueryCountReport;
use crate::test_case::TestCaseQueryContainer;

/// 테스트 실행 전체의 쿼리를 테스트 케이스별로 보관
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestResultQueryContainer {
    queries_by_testcase: BTreeMap<String, TestCaseQueryContainer>,
    total: usize,
}

impl TestResultQueryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트 케이스의 쿼리를 합침
    ///
    /// `test_case_id` 는 보통 모듈, 클래스, 함수 이름을 포함한 전체 이름이다.
    /// 같은 id 로 여러 번 추가하면 기존 컨테이너에 누적된다.
    pub fn add(&mut self, test_case_id: impl Into<String>, queries: &TestCaseQueryContainer) {
        let test_case_id = test_case_id.into();
        debug!("테스트 케이스 쿼리 추가: {test_case_id} ({}개)", queries.total());

        self.queries_by_testcase
            .entry(test_case_id)
            .or_default()
            .merge(queries);
        self.total += queries.total();
    }

    /// 다른 실행 결과를 합침
    pub fn merge(&mut self, other: &TestResultQueryContainer) {
        for (test_case_id, queries) in &other.queries_by_testcase {
            self.add(test_case_id.clone(), queries);
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 테스트 케이스 수
    pub fn len(&self) -> usize {
        self.queries_by_testcase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries_by_testcase.is_empty()
    }

    pub fn get(&self, test_case_id: &str) -> Option<&TestCaseQueryContainer> {
        self.queries_by_testcase.get(test_case_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestCaseQueryContainer)> {
        self.queries_by_testcase
            .iter()
            .map(|(test_case_id, queries)| (test_case_id.as_str(), queries))
    }

    /// 요약(`detail = false`) 또는 상세 리포트로 변환
    pub fn to_report(&self, detail: bool) -> QueryCountReport {
        QueryCountReport {
            test_cases: self
                .iter()
                .map(|(test_case_id, queries)| queries.to_report(test_case_id, detail))
                .collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{QueryRecord, RequestId};

    fn single(method: &str, path: &str, count: usize) -> TestCaseQueryContainer {
        let mut container = TestCaseQueryContainer::new();
        let queries = (0..count).map(|i| QueryRecord::new(format!("SELECT {i}"), 0.01)).collect();
        container.add(RequestId(1), method, path, queries);
        container
    }

    #[test]
    fn test_empty() {
        let container = TestResultQueryContainer::new();
        assert_eq!(container.total(), 0);

        let report = container.to_report(true);
        assert_eq!(report.total, 0);
        assert!(report.test_cases.is_empty());
    }

    #[test]
    fn test_add() {
        let mut result = TestResultQueryContainer::new();
        result.add("some.test.test_function", &single("delete", "some_path", 1));
        assert_eq!(result.total(), 1);

        result.add("some.test.test_other", &single("patch", "other_path", 1));
        assert_eq!(result.total(), 2);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_add_same_test_case_accumulates() {
        let mut result = TestResultQueryContainer::new();
        result.add("t", &single("get", "/a", 2));
        result.add("t", &single("get", "/a", 3));

        assert_eq!(result.len(), 1);
        assert_eq!(result.total(), 5);
        assert_eq!(result.get("t").unwrap().total(), 5);
    }

    #[test]
    fn test_single_report() {
        let mut result = TestResultQueryContainer::new();
        result.add("some.test.test_function", &single("delete", "some_path", 1));

        let report = result.to_report(false);

        assert_eq!(report.total, 1);
        assert_eq!(report.test_cases.len(), 1);
        assert_eq!(report.test_cases[0].id, "some.test.test_function");
        assert_eq!(report.test_cases[0].queries[0].total, 1);
    }

    #[test]
    fn test_merge_runs_is_total_additive() {
        let mut a = TestResultQueryContainer::new();
        a.add("t1", &single("get", "/a", 2));
        let mut b = TestResultQueryContainer::new();
        b.add("t1", &single("get", "/a", 1));
        b.add("t2", &single("post", "/b", 4));

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab.total(), 7);
        assert_eq!(ab.total(), ba.total());
        assert_eq!(ab.to_report(false), ba.to_report(false));
    }
}
