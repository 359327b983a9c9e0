use std::collections::{vec_deque, VecDeque};

use crate::{Pid, ProcessControlBlock};

/// FIFO queue of processes waiting for the CPU
///
/// Owns its records: enqueueing moves a PCB in, dequeueing or removing moves it out.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessControlBlock>,
}

impl ReadyQueue {
    pub fn new() -> ReadyQueue {
        ReadyQueue {
            queue: VecDeque::new(),
        }
    }

    /// Appends the process at the tail of the queue
    ///
    /// * `pcb` - process to be enqueued
    pub fn enqueue(&mut self, pcb: ProcessControlBlock) {
        self.queue.push_back(pcb);
    }

    /// Takes the process at the head of the queue
    pub fn dequeue(&mut self) -> Option<ProcessControlBlock> {
        self.queue.pop_front()
    }

    /// Takes the process at position `index`, counted from the head
    ///
    /// * `index` - position in scan order
    pub fn remove(&mut self, index: usize) -> Option<ProcessControlBlock> {
        self.queue.remove(index)
    }

    /// Moves every queued process out, head first, leaving the queue empty
    pub fn drain(&mut self) -> vec_deque::Drain<'_, ProcessControlBlock> {
        self.queue.drain(..)
    }

    pub fn front(&self) -> Option<&ProcessControlBlock> {
        self.queue.front()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, ProcessControlBlock> {
        self.queue.iter()
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.queue.iter().map(|pcb| pcb.pid()).collect()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.queue.iter().any(|pcb| pcb.pid() == pid)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
