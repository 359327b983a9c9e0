use std::num::NonZeroUsize;

use crate::common_funcs::{execute_running, exit_if_finished, take_expired};
use crate::{Collector, CompletionNotifier, CpuSlot, Pid, ReadyQueue, Scheduler, Timestamp};

/// Round Robin over a single FIFO ready queue
///
/// A process keeps the CPU for at most `quanta` ms, then goes back to the
/// tail of the ready queue, unless it finished in the meantime.
pub struct RoundRobinScheduler {
	/// Time quanta of the scheduler
	quanta: NonZeroUsize,
	/// CPU time charged per tick
	tick: usize,
}

impl RoundRobinScheduler {
	pub fn new(timeslice: NonZeroUsize, tick: NonZeroUsize) -> RoundRobinScheduler {
		RoundRobinScheduler {
			quanta: timeslice,
			tick: tick.get(),
		}
	}

	fn enqueue_expired(&self, now: Timestamp, queue: &mut ReadyQueue, cpu: &mut CpuSlot) {
		if let Some(pcb) = take_expired(cpu, now, self.quanta.get()) {
			log::debug!(
				"[{}] pid {} expired, {} ms left",
				now,
				pcb.pid(),
				pcb.remaining_time_ms()
			);
			queue.enqueue(pcb);
		}
	}

	fn dequeue_process(&self, now: Timestamp, queue: &mut ReadyQueue, cpu: &mut CpuSlot) {
		if let Some(pcb) = queue.dequeue() {
			cpu.dispatch(pcb, now);
		}
	}
}

impl Scheduler for RoundRobinScheduler {
	fn tick(
		&mut self,
		now: Timestamp,
		queue: &mut ReadyQueue,
		cpu: &mut CpuSlot,
		notifier: &mut dyn CompletionNotifier,
	) {
		execute_running(cpu, self.tick);

		/* Finishing on the tick that also ends the quanta counts as done, not expired */
		if !exit_if_finished(cpu, now, notifier) {
			self.enqueue_expired(now, queue, cpu);
		}

		if cpu.is_idle() {
			self.dequeue_process(now, queue, cpu);
		}
	}

	fn name(&self) -> &'static str {
		"Round-Robin"
	}
}

impl Collector for RoundRobinScheduler {
	fn collect_queued(&self) -> Vec<Pid> {
		Vec::new()
	}
}
