use std::sync::{Mutex, PoisonError};

use querycount_container::QueryRecord;

/// DB 연결의 쿼리 로그
///
/// 요청 전후의 로그 길이로 해당 요청에서 실행된 쿼리를 잘라낸다.
pub trait QueryLog {
    /// 지금까지 기록된 쿼리 수
    fn len(&self) -> usize;

    /// `start..end` 구간의 쿼리. 범위를 벗어나면 빈 목록
    fn slice(&self, start: usize, end: usize) -> Vec<QueryRecord>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryLog for Vec<QueryRecord> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> Vec<QueryRecord> {
        self.get(start..end).map(<[QueryRecord]>::to_vec).unwrap_or_default()
    }
}

impl QueryLog for Mutex<Vec<QueryRecord>> {
    fn len(&self) -> usize {
        self.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn slice(&self, start: usize, end: usize) -> Vec<QueryRecord> {
        QueryLog::slice(&*self.lock().unwrap_or_else(PoisonError::into_inner), start, end)
    }
}
