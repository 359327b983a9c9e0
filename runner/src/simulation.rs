use std::collections::VecDeque;

use scheduler::{
    collect_all, ChannelHandle, CompletionEvent, CompletionNotifier, CpuSlot, NotifyError, Pid,
    ProcessControlBlock, ReadyQueue, Scheduler, Timestamp,
};

use crate::workload::Arrival;

/// Forwards events to the real notifier and keeps a copy
///
/// The copy is kept even when delivery fails: the process is done regardless.
struct Tally<'a> {
    inner: &'a mut dyn CompletionNotifier,
    completed: &'a mut Vec<CompletionEvent>,
}

impl CompletionNotifier for Tally<'_> {
    fn notify(
        &mut self,
        channel: ChannelHandle,
        event: CompletionEvent,
    ) -> Result<(), NotifyError> {
        self.completed.push(event);
        self.inner.notify(channel, event)
    }
}

/// Drives a scheduler: admits arrivals, ticks, and advances the clock
pub struct Simulation<N: CompletionNotifier> {
    scheduler: Box<dyn Scheduler>,
    queue: ReadyQueue,
    cpu: CpuSlot,
    notifier: N,
    /// Processes not admitted yet, by arrival time
    pending: VecDeque<Arrival>,
    completed: Vec<CompletionEvent>,
    now: Timestamp,
    tick_ms: usize,
}

impl<N: CompletionNotifier> Simulation<N> {
    /// * `scheduler` - the policy to run
    /// * `notifier` - receives the completion messages
    /// * `workload` - arrivals, sorted by arrival time
    /// * `tick_ms` - clock step, must match the scheduler's tick
    pub fn new(
        scheduler: Box<dyn Scheduler>,
        notifier: N,
        workload: Vec<Arrival>,
        tick_ms: usize,
    ) -> Self {
        Simulation {
            scheduler,
            queue: ReadyQueue::new(),
            cpu: CpuSlot::new(),
            notifier,
            pending: workload.into(),
            completed: Vec::new(),
            now: Timestamp::new(0),
            tick_ms,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    #[cfg(test)]
    pub fn cpu(&self) -> &CpuSlot {
        &self.cpu
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn completed(&self) -> &[CompletionEvent] {
        &self.completed
    }

    /// Every live pid, running one first; see [`collect_all`]
    pub fn live_pids(&self) -> Vec<Pid> {
        collect_all(&self.scheduler, &self.queue, &self.cpu)
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.live_pids().is_empty()
    }

    /// Admits the processes whose arrival time has come, at the tail of the
    /// ready queue
    fn admit_arrivals(&mut self) {
        while let Some(arrival) = self.pending.front() {
            if arrival.arrival > self.now {
                break;
            }

            let pid = arrival.pid;
            self.queue.enqueue(ProcessControlBlock::new(
                pid,
                ChannelHandle::new(pid.get()),
                arrival.required_time_ms,
            ));
            self.pending.pop_front();

            log::info!("[{}] pid {} admitted", self.now, pid);
        }
    }

    /// Runs one tick at the current time, then advances the clock
    pub fn step(&mut self) {
        self.admit_arrivals();

        let mut tally = Tally {
            inner: &mut self.notifier,
            completed: &mut self.completed,
        };
        self.scheduler.tick(self.now, &mut self.queue, &mut self.cpu, &mut tally);

        self.now = self.now + self.tick_ms;
    }

    /// Steps until every process of the workload has completed
    pub fn run_to_completion(&mut self) -> &[CompletionEvent] {
        log::info!("running {} scheduler", self.scheduler.name());

        while !self.is_finished() {
            self.step();
        }

        log::info!("all processes done at {}", self.now);
        &self.completed
    }

    pub fn into_notifier(self) -> N {
        self.notifier
    }
}
