use crate::{CompletionEvent, CompletionNotifier, CpuSlot, ProcessControlBlock, Timestamp};

/// Charges one tick of CPU time to the running process, if any
pub(crate) fn execute_running(cpu: &mut CpuSlot, tick: usize) {
    if let Some(pcb) = cpu.running_mut() {
        pcb.execute(tick);
    }
}

/// Ends a finished process: sends its completion event and drops the PCB
///
/// This is the only place a PCB is destroyed. A failed delivery is logged,
/// the process is gone either way.
pub(crate) fn execute_exit(
    pcb: ProcessControlBlock,
    now: Timestamp,
    notifier: &mut dyn CompletionNotifier,
) {
    let event = CompletionEvent::done(pcb.pid(), now);

    log::debug!(
        "[{}] pid {} done ({}/{} ms)",
        now,
        pcb.pid(),
        pcb.elapsed_time_ms(),
        pcb.required_time_ms()
    );

    if let Err(err) = notifier.notify(pcb.channel(), event) {
        log::warn!("completion of pid {} on channel {} lost: {}", pcb.pid(), pcb.channel(), err);
    }
}

/// Takes the running process off the CPU if it has consumed all of its time,
/// and completes it
///
/// Returns `true` when a process completed.
pub(crate) fn exit_if_finished(
    cpu: &mut CpuSlot,
    now: Timestamp,
    notifier: &mut dyn CompletionNotifier,
) -> bool {
    let finished = cpu.running().map_or(false, |pcb| pcb.is_finished());
    if !finished {
        return false;
    }

    match cpu.release() {
        Some(pcb) => {
            execute_exit(pcb, now, notifier);
            true
        }
        None => false,
    }
}

/// Takes the running process off the CPU if its time slice is over
pub(crate) fn take_expired(
    cpu: &mut CpuSlot,
    now: Timestamp,
    quantum: usize,
) -> Option<ProcessControlBlock> {
    let expired = cpu.running().map_or(false, |pcb| pcb.slice_expired(now, quantum));

    if expired {
        cpu.release()
    } else {
        None
    }
}
