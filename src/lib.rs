pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Interval, Process, ProcessId, Ticks};
pub use scheduler::{Admission, Algorithm, Scheduler};
pub use sim::{Sim, SimConfig, SimError, SimReport, Workload, compare, simulate};
