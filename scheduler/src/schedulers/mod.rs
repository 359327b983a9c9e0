//! The scheduling policies
//!
//! Each one implements [`Scheduler`](crate::Scheduler) and is picked once,
//! when the scheduler is built.

mod round_robin;
pub use round_robin::RoundRobinScheduler;

mod mlfq;
pub use mlfq::MlfqScheduler;

mod sjf;
pub use sjf::ShortestJobFirstScheduler;
