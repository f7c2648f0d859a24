use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, ops::Range};

use super::event::Interval;

// Index into the arrival-sorted Entry Vec
pub type Slot = usize;
pub type ProcessId = u32;
pub type Ticks = u64;
pub type SignedTicks = i64;
pub type Priority = i64;

// Latest time the clock may reach, so every time converts to SignedTicks losslessly
pub const CLOCK_LIMIT: Ticks = SignedTicks::MAX as Ticks;

/// Upper bound on every clock value a run over `processes` can reach:
/// the last arrival plus the total burst. None if it passes [`CLOCK_LIMIT`].
pub fn horizon(processes: &[Process]) -> Option<Ticks> {
    let last_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |t, p| t.checked_add(p.burst))
        .filter(|&t| t <= CLOCK_LIMIT)
}

/// Immutable input attributes of a process.
///
/// `id` is assigned 1-indexed in input order and never changes. Lower
/// `priority` values win under priority scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
}

impl Process {
    pub fn new(id: ProcessId, arrival: Ticks, burst: Ticks, priority: Priority) -> Self {
        Self {
            id,
            arrival,
            burst,
            priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Pending,
    Ready,
    Running,
    Completed,
}

/// Outputs computed for a process during one run. Unset until the process
/// finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub completion: Option<Ticks>,
    pub turnaround: Option<SignedTicks>,
    pub waiting: Option<SignedTicks>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub process: Process,
    pub state: ProcessState,
    pub remaining: Ticks,
    pub stats: ProcessStats,
}

impl Entry {
    fn new(process: Process) -> Self {
        Self {
            process,
            state: ProcessState::Pending,
            remaining: process.burst,
            stats: ProcessStats::default(),
        }
    }

    pub fn executed(&self) -> Ticks {
        self.process.burst - self.remaining
    }
}

/// Ready-set ordering key. KeyedPriorityQueue is a max-heap, so Ord is
/// flipped: the smallest key wins, then the lowest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinKey<K>(pub K, pub ProcessId);

impl<K: Ord> PartialOrd for MinKey<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for MinKey<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0).then_with(|| other.1.cmp(&self.1))
    }
}

#[derive(Debug)]
pub struct ReadyHeap<K: Ord> {
    slots: KeyedPriorityQueue<Slot, MinKey<K>>,
}

impl<K: Ord> ReadyHeap<K> {
    pub fn new() -> Self {
        Self {
            slots: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, slot: Slot, key: MinKey<K>) {
        let displaced = self.slots.push(slot, key);
        debug_assert!(displaced.is_none(), "Slot {slot} pushed twice");
    }

    pub fn pop(&mut self) -> Option<Slot> {
        self.slots.pop().map(|(slot, _)| slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: Ord> Default for ReadyHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Process Registry, simulated clock and emitted timeline for one run.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub entries: Vec<Entry>,
    pub timeline: Vec<Interval>,
    slot_of: FxHashMap<ProcessId, Slot>,

    // First entry not yet admitted; entries are sorted so arrivals are contiguous
    arrival_cursor: Slot,
    completed: usize,
}

impl SimCtx {
    /// Builds a fresh registry from a snapshot. The snapshot is copied and
    /// stably sorted by arrival, so equal arrivals keep input order.
    pub fn new(processes: &[Process]) -> Self {
        let mut sorted = processes.to_vec();
        sorted.sort_by(|a, b| a.arrival.cmp(&b.arrival).then_with(|| a.id.cmp(&b.id)));

        let slot_of = sorted
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id, slot))
            .collect();

        Self {
            now: 0,
            entries: sorted.into_iter().map(Entry::new).collect(),
            timeline: Vec::new(),
            slot_of,
            arrival_cursor: 0,
            completed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, slot: Slot) -> &Entry {
        &self.entries[slot]
    }

    pub fn process(&self, slot: Slot) -> &Process {
        &self.entries[slot].process
    }

    pub fn slot_of(&self, id: ProcessId) -> Option<Slot> {
        self.slot_of.get(&id).copied()
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.entries.len()
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.entries
            .get(self.arrival_cursor)
            .map(|e| e.process.arrival)
    }

    pub fn idle_until(&mut self, t: Ticks) {
        debug_assert!(t > self.now, "Idle target {t} is not in the future");
        self.now = t;
    }

    /// Marks every process with `arrival <= now` that has not been admitted
    /// yet as Ready and returns their slots.
    pub fn take_arrivals(&mut self) -> Range<Slot> {
        let start = self.arrival_cursor;
        let now = self.now;
        let count = self.entries[start..]
            .iter()
            .take_while(|e| e.process.arrival <= now)
            .count();

        self.admit(start..start + count)
    }

    /// Admits every remaining process regardless of arrival time.
    pub fn take_all(&mut self) -> Range<Slot> {
        self.admit(self.arrival_cursor..self.entries.len())
    }

    fn admit(&mut self, slots: Range<Slot>) -> Range<Slot> {
        for entry in &mut self.entries[slots.clone()] {
            debug_assert_eq!(entry.state, ProcessState::Pending);
            entry.state = ProcessState::Ready;
        }
        self.arrival_cursor = slots.end;
        slots
    }

    /// Runs `slot` for up to `slice` ticks starting now, emits the interval
    /// and advances the clock to its end.
    pub fn run_slice(&mut self, slot: Slot, slice: Ticks) -> Interval {
        let now = self.now;
        let entry = &mut self.entries[slot];
        debug_assert_eq!(
            entry.state,
            ProcessState::Ready,
            "Process {} dispatched while not Ready",
            entry.process.id
        );
        debug_assert!(slice > 0, "Zero-length slice for {}", entry.process.id);

        let ran = slice.min(entry.remaining);
        entry.remaining -= ran;
        entry.state = ProcessState::Running;

        let interval = Interval {
            pid: entry.process.id,
            start: now,
            end: now + ran,
        };
        self.now = interval.end;
        self.timeline.push(interval);
        interval
    }

    pub fn mark_ready(&mut self, slot: Slot) {
        let entry = &mut self.entries[slot];
        debug_assert_eq!(entry.state, ProcessState::Running);
        entry.state = ProcessState::Ready;
    }

    pub fn mark_completed(&mut self, slot: Slot) {
        let now = self.now;
        let entry = &mut self.entries[slot];
        debug_assert_eq!(
            entry.state,
            ProcessState::Running,
            "Process {} must have been running before marked complete",
            entry.process.id
        );
        debug_assert_eq!(entry.remaining, 0);

        let turnaround = signed(now) - signed(entry.process.arrival);
        entry.state = ProcessState::Completed;
        entry.stats = ProcessStats {
            completion: Some(now),
            turnaround: Some(turnaround),
            waiting: Some(turnaround - signed(entry.process.burst)),
        };
        self.completed += 1;
    }
}

// Callers keep the clock within horizon(), so this never truncates
fn signed(t: Ticks) -> SignedTicks {
    debug_assert!(t <= CLOCK_LIMIT, "Time {t} past the clock limit");
    t as SignedTicks
}
