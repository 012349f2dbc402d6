pub mod collector;
pub mod tracing;

pub use self::collector::{CollectorRun, TestCollector, free_port};
pub use self::tracing::{CapturedEvent, captured_events, init_test_tracing};
