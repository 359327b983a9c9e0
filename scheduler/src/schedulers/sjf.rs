use std::num::NonZeroUsize;

use crate::common_funcs::{execute_running, exit_if_finished};
use crate::{Collector, CompletionNotifier, CpuSlot, Pid, ReadyQueue, Scheduler, Timestamp};

/// Non-preemptive Shortest Job First
///
/// When the CPU is free, the process with the smallest total required time
/// is taken out of the ready queue, wherever it sits, and runs until it is done.
pub struct ShortestJobFirstScheduler {
    /// CPU time charged per tick
    tick: usize,
}

impl ShortestJobFirstScheduler {
    pub fn new(tick: NonZeroUsize) -> ShortestJobFirstScheduler {
        ShortestJobFirstScheduler { tick: tick.get() }
    }

    /// Position of the shortest job in the queue
    ///
    /// Among equal jobs the first one in queue order wins.
    fn shortest(queue: &ReadyQueue) -> Option<usize> {
        let mut shortest: Option<(usize, usize)> = None;

        for (index, pcb) in queue.iter().enumerate() {
            match shortest {
                Some((_, min_time)) if pcb.required_time_ms() >= min_time => (),
                _ => shortest = Some((index, pcb.required_time_ms())),
            }
        }

        shortest.map(|(index, _)| index)
    }

    fn dequeue_process(&self, now: Timestamp, queue: &mut ReadyQueue, cpu: &mut CpuSlot) {
        if let Some(pcb) = Self::shortest(queue).and_then(|index| queue.remove(index)) {
            cpu.dispatch(pcb, now);
        }
    }
}

impl Scheduler for ShortestJobFirstScheduler {
    fn tick(
        &mut self,
        now: Timestamp,
        queue: &mut ReadyQueue,
        cpu: &mut CpuSlot,
        notifier: &mut dyn CompletionNotifier,
    ) {
        execute_running(cpu, self.tick);
        exit_if_finished(cpu, now, notifier);

        if cpu.is_idle() {
            self.dequeue_process(now, queue, cpu);
        }
    }

    fn name(&self) -> &'static str {
        "SJF"
    }
}

impl Collector for ShortestJobFirstScheduler {
    fn collect_queued(&self) -> Vec<Pid> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedulers::test_utils::{admit, run_until, FailingNotifier};
    use crate::{EventLog, TICKS_MS};

    fn sjf() -> ShortestJobFirstScheduler {
        ShortestJobFirstScheduler::new(NonZeroUsize::new(TICKS_MS).unwrap())
    }

    #[test]
    fn shortest_job_runs_first() {
        let mut scheduler = sjf();
        let mut queue = ReadyQueue::new();
        let mut cpu = CpuSlot::new();
        let mut log = EventLog::new();
        admit(&mut queue, 2, 300);
        admit(&mut queue, 3, 100);

        scheduler.tick(Timestamp::new(0), &mut queue, &mut cpu, &mut log);
        assert_eq!(cpu.running_pid(), Some(Pid::new(3)));
        assert_eq!(queue.pids(), vec![Pid::new(2)]);

        scheduler.tick(Timestamp::new(100), &mut queue, &mut cpu, &mut log);
        assert_eq!(log.find(Pid::new(3)).unwrap().time, Timestamp::new(100));
        assert_eq!(cpu.running_pid(), Some(Pid::new(2)));

        run_until(&mut scheduler, &mut queue, &mut cpu, &mut log, 200, 400);
        assert_eq!(log.find(Pid::new(2)).unwrap().time, Timestamp::new(400));
        assert!(cpu.is_idle());
    }

    #[test]
    fn ties_go_to_the_earliest_arrival() {
        let mut scheduler = sjf();
        let mut queue = ReadyQueue::new();
        let mut cpu = CpuSlot::new();
        let mut log = EventLog::new();
        admit(&mut queue, 1, 800);
        admit(&mut queue, 2, 200);
        admit(&mut queue, 3, 200);

        scheduler.tick(Timestamp::new(0), &mut queue, &mut cpu, &mut log);

        assert_eq!(cpu.running_pid(), Some(Pid::new(2)));
        assert_eq!(queue.pids(), vec![Pid::new(1), Pid::new(3)]);
    }

    #[test]
    fn running_job_is_never_preempted() {
        let mut scheduler = sjf();
        let mut queue = ReadyQueue::new();
        let mut cpu = CpuSlot::new();
        let mut log = EventLog::new();
        admit(&mut queue, 1, 1500);

        run_until(&mut scheduler, &mut queue, &mut cpu, &mut log, 0, 300);
        admit(&mut queue, 2, 100);

        run_until(&mut scheduler, &mut queue, &mut cpu, &mut log, 400, 1400);
        assert_eq!(cpu.running_pid(), Some(Pid::new(1)));
        assert_eq!(cpu.running().unwrap().slice_start(), Timestamp::new(0));

        scheduler.tick(Timestamp::new(1500), &mut queue, &mut cpu, &mut log);
        assert_eq!(log.find(Pid::new(1)).unwrap().time, Timestamp::new(1500));
        assert_eq!(cpu.running_pid(), Some(Pid::new(2)));
    }

    #[test]
    fn every_dispatch_picks_a_minimum() {
        let mut scheduler = sjf();
        let mut queue = ReadyQueue::new();
        let mut cpu = CpuSlot::new();
        let mut log = EventLog::new();
        for (pid, required) in [(1, 700), (2, 300), (3, 900), (4, 100), (5, 300)] {
            admit(&mut queue, pid, required);
        }

        let mut order = Vec::new();
        let mut now = 0;
        while log.len() < 5 {
            let was_idle = cpu.is_idle();
            let min_waiting = queue.iter().map(|pcb| pcb.required_time_ms()).min();

            scheduler.tick(Timestamp::new(now), &mut queue, &mut cpu, &mut log);

            if let Some(pcb) = cpu.running() {
                if pcb.slice_start() == Timestamp::new(now) {
                    assert!(was_idle || log.events().any(|e| e.time == Timestamp::new(now)));
                    assert_eq!(Some(pcb.required_time_ms()), min_waiting);
                    order.push(pcb.pid().get());
                }
            }
            now += TICKS_MS;
        }

        assert_eq!(order, vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn failed_notification_still_frees_the_cpu() {
        let mut scheduler = sjf();
        let mut queue = ReadyQueue::new();
        let mut cpu = CpuSlot::new();
        let mut notifier = FailingNotifier::default();
        admit(&mut queue, 1, 100);
        admit(&mut queue, 2, 200);

        run_until(&mut scheduler, &mut queue, &mut cpu, &mut notifier, 0, 100);

        assert_eq!(notifier.attempts, 1);
        assert_eq!(cpu.running_pid(), Some(Pid::new(2)));
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_length_job_completes_on_the_next_tick() {
        let mut scheduler = sjf();
        let mut queue = ReadyQueue::new();
        let mut cpu = CpuSlot::new();
        let mut log = EventLog::new();
        admit(&mut queue, 1, 400);
        admit(&mut queue, 2, 0);

        scheduler.tick(Timestamp::new(0), &mut queue, &mut cpu, &mut log);
        assert_eq!(cpu.running_pid(), Some(Pid::new(2)));
        assert!(log.is_empty());

        scheduler.tick(Timestamp::new(100), &mut queue, &mut cpu, &mut log);
        assert_eq!(log.len(), 1);
        assert_eq!(log.find(Pid::new(2)).unwrap().time, Timestamp::new(100));
        assert_eq!(cpu.running_pid(), Some(Pid::new(1)));
    }
}
