use std::sync::atomic::{AtomicU64, Ordering};

use hyper::Request;
use log::debug;

use querycount_config::CounterConfig;
use querycount_container::{QueryRecord, RequestId};

use crate::local;
use crate::query_log::QueryLog;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// 요청 하나가 처리되는 동안의 쿼리 수집
///
/// 핸들러 호출 전에 `begin`, 응답 후에 `finish` 를 호출한다. 요청에는
/// `RequestId` 확장이 붙으므로 같은 요청을 두 번 감싸도 한 번만 집계된다.
#[derive(Debug)]
pub struct RequestCapture {
    request_id: RequestId,
    initial_queries: usize,
    keep_stacktraces: bool,
}

impl RequestCapture {
    /// 수집 시작. 실행 중인 테스트 케이스가 없으면 `None`
    pub fn begin<L, B>(log: &L, request: &mut Request<B>, config: &CounterConfig) -> Option<Self>
    where
        L: QueryLog + ?Sized,
    {
        if !config.enable || !local::is_active() {
            return None;
        }

        let request_id = match request.extensions().get::<RequestId>() {
            Some(request_id) => *request_id,
            None => {
                let request_id = RequestId(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed));
                request.extensions_mut().insert(request_id);
                request_id
            }
        };

        Some(Self {
            request_id,
            initial_queries: log.len(),
            keep_stacktraces: config.enable_stacktraces,
        })
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// 수집 종료. 시작 이후 실행된 쿼리를 현재 테스트 케이스에 기록
    ///
    /// 기록되지 않은 경우(테스트 케이스 종료, 중복 요청) false 반환
    pub fn finish<L, B>(self, log: &L, request: &Request<B>) -> bool
    where
        L: QueryLog + ?Sized,
    {
        let final_queries = log.len();
        let mut captured = log.slice(self.initial_queries, final_queries);
        if !self.keep_stacktraces {
            captured = captured.into_iter().map(QueryRecord::without_stacktrace).collect();
        }

        let method = request.method().as_str();
        let path = request.uri().path();
        let recorded = local::with_container(|container| {
            container.add(self.request_id, method, path, captured)
        });
        match recorded {
            Some(recorded) => recorded,
            None => {
                debug!("테스트 케이스 컨테이너 없음, 요청 무시: {method} {path}");
                false
            }
        }
    }
}
