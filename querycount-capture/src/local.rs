//! 현재 스레드에서 실행 중인 테스트 케이스의 쿼리 컨테이너
//!
//! 테스트 워커 스레드마다 별도의 컨테이너를 가지므로 동시에 실행되는 테스트끼리
//! 섞이지 않는다.

use std::cell::RefCell;

use querycount_container::TestCaseQueryContainer;

thread_local! {
    static TESTCASE_CONTAINER: RefCell<Option<TestCaseQueryContainer>> =
        const { RefCell::new(None) };
}

/// 새 컨테이너 설치. 기존 컨테이너는 버려진다
pub fn install(container: TestCaseQueryContainer) {
    TESTCASE_CONTAINER.with(|slot| *slot.borrow_mut() = Some(container));
}

/// 컨테이너를 꺼내고 슬롯을 비운다
pub fn take() -> Option<TestCaseQueryContainer> {
    TESTCASE_CONTAINER.with(|slot| slot.borrow_mut().take())
}

pub fn is_active() -> bool {
    TESTCASE_CONTAINER.with(|slot| slot.borrow().is_some())
}

/// 활성 컨테이너가 있으면 `f` 실행
pub fn with_container<R>(f: impl FnOnce(&mut TestCaseQueryContainer) -> R) -> Option<R> {
    TESTCASE_CONTAINER.with(|slot| slot.borrow_mut().as_mut().map(f))
}
