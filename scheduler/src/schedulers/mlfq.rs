use std::num::NonZeroUsize;

use crate::common_funcs::{execute_running, exit_if_finished, take_expired};
use crate::{Collector, CompletionNotifier, CpuSlot, Pid, ReadyQueue, Scheduler, Timestamp};

/// Multi-Level Feedback Queue
///
/// New processes arrive through the driver's queue and start at level 0.
/// A process that uses up its quanta is demoted one level, down to the
/// lowest one, where the processes take turns round robin. There is no
/// promotion: a level never decreases.
pub struct MlfqScheduler {
    /// Ready queue of each priority, index 0 is dispatched first
    levels: Vec<ReadyQueue>,
    /// Time quanta, the same on every level
    quanta: NonZeroUsize,
    /// CPU time charged per tick
    tick: usize,
}

impl MlfqScheduler {
    pub fn new(levels: NonZeroUsize, timeslice: NonZeroUsize, tick: NonZeroUsize) -> MlfqScheduler {
        MlfqScheduler {
            levels: (0..levels.get()).map(|_| ReadyQueue::new()).collect(),
            quanta: timeslice,
            tick: tick.get(),
        }
    }

    /// The queue of a priority level
    ///
    /// * `level` - 0 is the highest priority
    pub fn level(&self, level: usize) -> Option<&ReadyQueue> {
        self.levels.get(level)
    }

    fn lowest_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Moves every newly arrived process into level 0
    fn admit_arrivals(&mut self, arrivals: &mut ReadyQueue) {
        for mut pcb in arrivals.drain() {
            pcb.set_priority_level(0);
            self.levels[0].enqueue(pcb);
        }
    }

    fn demote_expired(&mut self, now: Timestamp, cpu: &mut CpuSlot) {
        if let Some(mut pcb) = take_expired(cpu, now, self.quanta.get()) {
            let level = (pcb.priority_level() + 1).min(self.lowest_level());

            log::debug!(
                "[{}] pid {} expired, level {} -> {}",
                now,
                pcb.pid(),
                pcb.priority_level(),
                level
            );

            pcb.set_priority_level(level);
            self.levels[level].enqueue(pcb);
        }
    }

    fn dequeue_process(&mut self, now: Timestamp, cpu: &mut CpuSlot) {
        for (level, queue) in self.levels.iter_mut().enumerate() {
            if let Some(mut pcb) = queue.dequeue() {
                pcb.set_priority_level(level);
                cpu.dispatch(pcb, now);
                return;
            }
        }
    }
}

impl Scheduler for MlfqScheduler {
    fn tick(
        &mut self,
        now: Timestamp,
        queue: &mut ReadyQueue,
        cpu: &mut CpuSlot,
        notifier: &mut dyn CompletionNotifier,
    ) {
        self.admit_arrivals(queue);

        execute_running(cpu, self.tick);

        if !exit_if_finished(cpu, now, notifier) {
            self.demote_expired(now, cpu);
        }

        if cpu.is_idle() {
            self.dequeue_process(now, cpu);
        }
    }

    fn name(&self) -> &'static str {
        "MLFQ"
    }
}

impl Collector for MlfqScheduler {
    fn collect_queued(&self) -> Vec<Pid> {
        self.levels.iter().flat_map(|queue| queue.pids()).collect()
    }
}
