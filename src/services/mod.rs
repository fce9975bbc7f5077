pub mod optimizer;
pub mod planner;
pub mod storage;
