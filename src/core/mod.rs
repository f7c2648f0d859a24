pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::Interval;
pub use state::{
    CLOCK_LIMIT, Entry, MinKey, Priority, Process, ProcessId, ProcessState, ProcessStats, ReadyHeap,
    SignedTicks, SimCtx, Slot, Ticks, horizon,
};
