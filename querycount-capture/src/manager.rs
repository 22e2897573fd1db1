use std::sync::Mutex;

use hyper::Request;
use log::{debug, info};

use querycount_config::CounterConfig;
use querycount_container::{TestCaseQueryContainer, TestResultQueryContainer};
use querycount_error::Result;
use querycount_exclusion::ExclusionList;

use crate::local;
use crate::query_log::QueryLog;
use crate::request::RequestCapture;

/// 테스트 실행 단위의 쿼리 수집 관리자
///
/// 테스트 러너가 다음 순서로 호출한다.
///
/// 1. `setup_test_environment` (실행 시작)
/// 2. 테스트마다 `pre_setup` → 요청마다 `begin_request`/`RequestCapture::finish`
///    → `post_teardown`
/// 3. `teardown_test_environment` (요약/상세 리포트 저장)
///
/// 설정에서 비활성화된 경우 모든 호출은 아무 일도 하지 않는다.
#[derive(Debug)]
pub struct QueryCountManager {
    config: CounterConfig,
    queries: Mutex<Option<TestResultQueryContainer>>,
}

impl Default for QueryCountManager {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}

impl QueryCountManager {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            queries: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn enabled(&self) -> bool {
        self.config.enable
    }

    /// 실행 시작. 새 실행 컨테이너 생성
    pub fn setup_test_environment(&self) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }

        info!("쿼리 카운트 수집 시작");
        *self.queries.lock()? = Some(TestResultQueryContainer::new());
        Ok(())
    }

    /// 테스트 시작. 현재 스레드에 테스트 케이스 컨테이너 설치
    pub fn pre_setup(&self) {
        if self.enabled() {
            local::install(TestCaseQueryContainer::new());
        }
    }

    /// 요청 수집 시작
    pub fn begin_request<L, B>(&self, log: &L, request: &mut Request<B>) -> Option<RequestCapture>
    where
        L: QueryLog + ?Sized,
    {
        RequestCapture::begin(log, request, &self.config)
    }

    /// 테스트 종료. 제외 조건을 적용해 실행 컨테이너에 합침
    pub fn post_teardown(&self, test_case_id: &str, exclusions: &ExclusionList) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }

        let Some(container) = local::take() else {
            debug!("테스트 케이스 컨테이너 없음: {test_case_id}");
            return Ok(());
        };

        if exclusions.is_skipped() {
            debug!("쿼리 카운트 제외된 테스트: {test_case_id}");
            return Ok(());
        }

        let mut queries = self.queries.lock()?;
        match queries.as_mut() {
            Some(all_queries) => {
                all_queries.add(test_case_id, &container.filter_by(exclusions));
            }
            None => {
                debug!("실행 컨테이너 없음, 테스트 결과 무시: {test_case_id}");
            }
        }
        Ok(())
    }

    /// 실행 종료. 요약/상세 리포트를 저장하고 실행 컨테이너 반환
    pub fn teardown_test_environment(&self) -> Result<Option<TestResultQueryContainer>> {
        if !self.enabled() {
            return Ok(None);
        }

        let mut queries = self.queries.lock()?;
        let Some(all_queries) = queries.as_ref() else {
            debug!("실행 컨테이너 없음, 리포트 저장 생략");
            return Ok(None);
        };

        all_queries.to_report(false).save(self.config.summary_path())?;
        all_queries.to_report(true).save(self.config.detail_path())?;

        info!(
            "쿼리 카운트 수집 종료: 테스트 케이스 {}개, 쿼리 {}개",
            all_queries.len(),
            all_queries.total()
        );

        // 두 리포트가 모두 저장된 뒤에만 비운다
        Ok(queries.take())
    }

    /// 현재까지의 실행 컨테이너 복사본
    pub fn snapshot(&self) -> Result<Option<TestResultQueryContainer>> {
        Ok(self.queries.lock()?.clone())
    }
}
