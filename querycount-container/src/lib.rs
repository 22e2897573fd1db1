pub mod record;
pub mod report;
pub mod test_case;
pub mod test_result;

pub use record::{
    ApiCall,
    QueryRecord,
    RequestId,
    StackFrame,
};

pub use report::{
    ApiCallReport,
    QueryCountReport,
    TestCaseReport,
};

pub use test_case::TestCaseQueryContainer;
pub use test_result::TestResultQueryContainer;
