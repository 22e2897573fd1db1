use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};

use querycount_container::{ApiCallReport, QueryCountReport, TestCaseReport};
use querycount_error::{Result, config_err};

use crate::violation::Violation;

/// 현재 실행 리포트를 기준 리포트와 비교해 쿼리 수 증가를 찾는다
#[derive(Debug, Clone)]
pub struct QueryCountEvaluator {
    /// 허용 증가율 (퍼센트, 예: 10)
    threshold: f64,
    current: QueryCountReport,
    last: QueryCountReport,
}

impl QueryCountEvaluator {
    /// `current` 는 이번 실행, `last` 는 마지막으로 승인된 실행의 리포트
    pub fn new(threshold: f64, current: QueryCountReport, last: QueryCountReport) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(config_err(format!("허용 증가율이 유효하지 않음: {threshold}")));
        }

        Ok(Self {
            threshold,
            current,
            last,
        })
    }

    /// 두 리포트 파일을 읽어 생성
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        threshold: f64,
        current_path: P,
        last_path: Q,
    ) -> Result<Self> {
        let current = QueryCountReport::from_file(current_path)?;
        let last = QueryCountReport::from_file(last_path)?;
        Self::new(threshold, current, last)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 이전 쿼리 수에 대한 허용치. 반올림은 짝수 쪽으로 (banker's rounding)
    pub fn allowed_queries(&self, previous: usize) -> i64 {
        let max_factor = self.threshold / 100.0 + 1.0;
        (previous as f64 * max_factor).round_ties_even() as i64
    }

    /// 모든 테스트 케이스의 위반 목록
    pub fn list_violations(&self) -> Vec<Violation> {
        let last_test_cases: HashMap<&str, &TestCaseReport> = self
            .last
            .test_cases
            .iter()
            .map(|test_case| (test_case.id.as_str(), test_case))
            .collect();

        let mut violations = Vec::new();
        for test_case in &self.current.test_cases {
            let last_queries: &[ApiCallReport] = match last_test_cases.get(test_case.id.as_str()) {
                Some(last) => last.queries.as_slice(),
                None => {
                    debug!("기준 리포트에 없는 테스트 케이스: {}", test_case.id);
                    &[]
                }
            };
            violations.extend(self.compare_test_cases(
                &test_case.id,
                &test_case.queries,
                last_queries,
            ));
        }
        violations
    }

    /// 테스트 케이스 하나의 API 호출 비교
    ///
    /// 기준이 없는 API 호출은 허용치가 무한대인 것으로 보고 위반이 되지 않는다.
    /// 사라진 API 호출은 무시한다.
    pub fn compare_test_cases(
        &self,
        test_case_id: &str,
        current_queries: &[ApiCallReport],
        last_queries: &[ApiCallReport],
    ) -> Vec<Violation> {
        let last_totals: HashMap<(&str, &str), usize> = last_queries
            .iter()
            .map(|element| ((element.method.as_str(), element.path.as_str()), element.total))
            .collect();

        current_queries
            .iter()
            .filter_map(|element| {
                let previous = last_totals.get(&(element.method.as_str(), element.path.as_str()))?;
                let threshold = self.allowed_queries(*previous);
                if (element.total as i64) > threshold {
                    Some(Violation {
                        test_case_id: test_case_id.to_string(),
                        method: element.method.clone(),
                        path: element.path.clone(),
                        threshold,
                        total: element.total,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// 비교 결과를 `stream` 에 출력하고 위반 목록 반환
    pub fn run<W: Write>(&self, stream: &mut W) -> Result<Vec<Violation>> {
        let violations = self.list_violations();

        if violations.is_empty() {
            info!("허용치 초과 없음 (허용 증가율 {}%)", self.threshold);
            writeln!(stream, "All Tests API Queries are below the allowed threshold.")?;
        } else {
            warn!(
                "허용치 초과 API 호출 {}건 (허용 증가율 {}%)",
                violations.len(),
                self.threshold
            );
            writeln!(stream, "There are test cases with API calls that exceeded threshold:\n")?;
            for violation in &violations {
                writeln!(stream, "\t{violation}")?;
            }
        }

        stream.flush()?;
        Ok(violations)
    }
}
