use crate::exclusion::QueryCountExclusion;

/// 테스트 케이스 하나에 적용되는 제외 조건 목록
///
/// 테스트 그룹 단위 목록과 테스트 함수 단위 목록은 `merged` 로 합쳐서 사용한다.
/// `skip` 이 설정된 테스트는 실행 결과에 아예 포함되지 않는다.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    rules: Vec<QueryCountExclusion>,
    skip: bool,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 제외 조건 추가
    #[must_use]
    pub fn exclude(mut self, exclusion: QueryCountExclusion) -> Self {
        self.rules.push(exclusion);
        self
    }

    /// 테스트 전체 제외
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn push(&mut self, exclusion: QueryCountExclusion) {
        self.rules.push(exclusion);
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub fn rules(&self) -> &[QueryCountExclusion] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && !self.skip
    }

    /// 두 목록 합치기. 어느 한쪽이라도 skip 이면 결과도 skip
    #[must_use]
    pub fn merged(&self, other: &ExclusionList) -> ExclusionList {
        ExclusionList {
            rules: self.rules.iter().chain(other.rules.iter()).cloned().collect(),
            skip: self.skip || other.skip,
        }
    }

    /// 요청 하나가 목록의 조건 중 하나라도 만족하는지
    pub fn excludes(&self, method: &str, path: &str, count: usize) -> bool {
        self.rules
            .iter()
            .any(|exclusion| exclusion.is_excluded(method, path, count))
    }
}

impl From<Vec<QueryCountExclusion>> for ExclusionList {
    fn from(rules: Vec<QueryCountExclusion>) -> Self {
        Self { rules, skip: false }
    }
}

impl FromIterator<QueryCountExclusion> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = QueryCountExclusion>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
