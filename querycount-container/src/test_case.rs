use std::collections::{BTreeMap, HashSet};

use log::debug;

use querycount_exclusion::ExclusionList;

use crate::record::{ApiCall, QueryRecord, RequestId};
use crate::report::{ApiCallReport, TestCaseReport};

/// 테스트 케이스 하나에서 발생한 쿼리를 API 호출별로 보관
///
/// `total` 은 항상 모든 API 호출의 쿼리 수 합과 같다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCaseQueryContainer {
    recorded_requests: HashSet<RequestId>,
    queries_by_api_call: BTreeMap<ApiCall, Vec<QueryRecord>>,
    total: usize,
}

impl TestCaseQueryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// API 호출에 쿼리 추가. 새 쿼리가 기존 쿼리 앞에 온다
    pub fn add_by_key(&mut self, api_call: ApiCall, queries: Vec<QueryRecord>) {
        self.total += queries.len();
        let existing = self.queries_by_api_call.entry(api_call).or_default();
        let mut merged = queries;
        merged.append(existing);
        *existing = merged;
    }

    /// 요청 하나의 쿼리 기록. 이미 기록된 요청이면 무시하고 false 반환
    pub fn add(
        &mut self,
        request_id: RequestId,
        method: &str,
        path: &str,
        queries: Vec<QueryRecord>,
    ) -> bool {
        if !self.recorded_requests.insert(request_id) {
            debug!("이미 기록된 요청: {method} {path} ({request_id:?})");
            return false;
        }

        debug!("요청 쿼리 기록: {method} {path} ({}개)", queries.len());
        self.add_by_key(ApiCall::new(method, path), queries);
        true
    }

    /// 다른 컨테이너의 쿼리를 합침
    pub fn merge(&mut self, other: &TestCaseQueryContainer) {
        for (api_call, queries) in &other.queries_by_api_call {
            self.add_by_key(api_call.clone(), queries.clone());
        }
    }

    /// 제외 조건을 적용한 새 컨테이너
    #[must_use]
    pub fn filter_by(&self, exclusions: &ExclusionList) -> TestCaseQueryContainer {
        let mut filtered = TestCaseQueryContainer::new();
        for (api_call, queries) in &self.queries_by_api_call {
            if !exclusions.excludes(&api_call.method, &api_call.path, queries.len()) {
                filtered.add_by_key(api_call.clone(), queries.clone());
            }
        }
        filtered
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 기록된 API 호출 수
    pub fn len(&self) -> usize {
        self.queries_by_api_call.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries_by_api_call.is_empty()
    }

    pub fn queries(&self, api_call: &ApiCall) -> Option<&[QueryRecord]> {
        self.queries_by_api_call.get(api_call).map(Vec::as_slice)
    }

    pub fn count(&self, api_call: &ApiCall) -> usize {
        self.queries(api_call).map_or(0, <[QueryRecord]>::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ApiCall, &[QueryRecord])> {
        self.queries_by_api_call
            .iter()
            .map(|(api_call, queries)| (api_call, queries.as_slice()))
    }

    /// 리포트 항목으로 변환. `detail` 이면 쿼리 목록 포함
    pub fn to_report(&self, test_case_id: &str, detail: bool) -> TestCaseReport {
        TestCaseReport {
            id: test_case_id.to_string(),
            queries: self
                .iter()
                .map(|(api_call, queries)| ApiCallReport {
                    method: api_call.method.clone(),
                    path: api_call.path.clone(),
                    queries: detail.then(|| queries.to_vec()),
                    total: queries.len(),
                })
                .collect(),
            total: self.total,
        }
    }
}
