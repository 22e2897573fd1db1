pub mod evaluator;
pub mod violation;

pub use evaluator::QueryCountEvaluator;
pub use violation::Violation;
