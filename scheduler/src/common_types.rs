use std::fmt;
use std::ops::Add;

/// Simulated time charged to the running process on every tick
pub const TICKS_MS: usize = 100;

/// Default time quanta for the preemptive policies
pub const DEFAULT_QUANTUM_MS: usize = 500;

/// Default number of MLFQ priority levels
pub const MLFQ_LEVELS: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(usize);

impl Pid {
    /// Creates a new Pid object
    ///
    /// * `pid` - the process identifier as usize
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Add<usize> for Pid {
    type Output = Pid;

    fn add(self, rhs: usize) -> Self::Output {
        Pid::new(self.0 + rhs)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated time, in milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(usize);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp, in ms
    pub fn new(time: usize) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future
    pub fn since(&self, earlier: Timestamp) -> usize {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<usize> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: usize) -> Self::Output {
        Timestamp::new(self.0 + rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Opaque handle of the channel a process listens on for its completion
/// message. The scheduler never looks inside, it only hands it to the notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelHandle(usize);

impl ChannelHandle {
    pub fn new(handle: usize) -> ChannelHandle {
        ChannelHandle(handle)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_since_saturates() {
        let early = Timestamp::new(200);
        let late = Timestamp::new(700);

        assert_eq!(late.since(early), 500);
        assert_eq!(early.since(late), 0);
    }

    #[test]
    fn pid_add() {
        assert_eq!(Pid::new(1) + 1, Pid::new(2));
    }
}
