pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod report;
pub mod workload;

pub use config::SimConfig;
pub use driver::{Sim, compare, simulate};
pub use error::SimError;
pub use input::Workload;
pub use report::{ProcessOutcome, SimReport, Summary};
pub use workload::{BernoulliParams, bernoulli_processes};
