#[path = "property/review_aggregation.rs"]
mod review_aggregation;

#[path = "property/gate_thresholds.rs"]
mod gate_thresholds;

#[path = "property/qa_verdict.rs"]
mod qa_verdict;
