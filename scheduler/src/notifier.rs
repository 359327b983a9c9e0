//! Completion notifications.
//!
//! When a process has consumed all of its CPU time, the policy hands a
//! [`CompletionEvent`] to a [`CompletionNotifier`] together with the process'
//! channel handle. Delivery is fire-and-forget: a failure is reported back
//! to the policy, which logs it and destroys the process anyway.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use crate::{ChannelHandle, Pid, Timestamp};

/// Request code carried by a scheduler message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ProcessRequest {
    /// The process finished its work
    Done = 1,
}

impl ProcessRequest {
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

/// Message emitted exactly once per process, on the tick it finishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionEvent {
    pub pid: Pid,
    pub request: ProcessRequest,
    pub time: Timestamp,
}

impl CompletionEvent {
    /// Size of the encoded message
    pub const WIRE_SIZE: usize = 12;

    pub fn done(pid: Pid, time: Timestamp) -> CompletionEvent {
        CompletionEvent {
            pid,
            request: ProcessRequest::Done,
            time,
        }
    }

    /// Encodes the event as three little endian `u32`: pid, request, time
    ///
    /// Fails with [`NotifyError::OutOfRange`] if the pid or the time does not fit in 32 bits.
    pub fn encode(&self) -> Result<[u8; Self::WIRE_SIZE], NotifyError> {
        let pid = u32::try_from(self.pid.get()).map_err(|_| NotifyError::OutOfRange {
            field: "pid",
            value: self.pid.get(),
        })?;
        let time = u32::try_from(self.time.get()).map_err(|_| NotifyError::OutOfRange {
            field: "time",
            value: self.time.get(),
        })?;

        let mut buf = [0u8; Self::WIRE_SIZE];
        buf[0..4].copy_from_slice(&pid.to_le_bytes());
        buf[4..8].copy_from_slice(&self.request.code().to_le_bytes());
        buf[8..12].copy_from_slice(&time.to_le_bytes());
        Ok(buf)
    }

    /// Decodes a message produced by [`CompletionEvent::encode`]
    ///
    /// Returns `None` if `buf` is too short or carries an unknown request code.
    pub fn decode(buf: &[u8]) -> Option<CompletionEvent> {
        let word = |at: usize| -> Option<u32> {
            let bytes: [u8; 4] = buf.get(at..at + 4)?.try_into().ok()?;
            Some(u32::from_le_bytes(bytes))
        };

        let request = match word(4)? {
            1 => ProcessRequest::Done,
            _ => return None,
        };

        Some(CompletionEvent {
            pid: Pid::new(word(0)? as usize),
            request,
            time: Timestamp::new(word(8)? as usize),
        })
    }
}

#[derive(Debug)]
pub enum NotifyError {
    /// No sink is registered for the channel
    UnknownChannel(ChannelHandle),
    /// The sink accepted only part of the message
    ShortWrite { written: usize, expected: usize },
    /// The sink failed
    Io(io::Error),
    /// A field does not fit in the 32 bits the message gives it
    OutOfRange { field: &'static str, value: usize },
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::UnknownChannel(channel) => write!(f, "unknown channel {}", channel),
            NotifyError::ShortWrite { written, expected } => {
                write!(f, "short write: {} of {} bytes", written, expected)
            }
            NotifyError::Io(err) => write!(f, "write failed: {}", err),
            NotifyError::OutOfRange { field, value } => {
                write!(f, "{} {} does not fit in 32 bits", field, value)
            }
        }
    }
}

impl std::error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotifyError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for NotifyError {
    fn from(err: io::Error) -> Self {
        NotifyError::Io(err)
    }
}

/// Sink for completion events
pub trait CompletionNotifier {
    /// Delivers `event` on `channel`
    ///
    /// * `channel` - the handle stored in the finished process' PCB
    /// * `event` - what to deliver
    fn notify(&mut self, channel: ChannelHandle, event: CompletionEvent)
        -> Result<(), NotifyError>;
}

/// Notifier writing encoded events to one writer per channel
///
/// Each event is written with a single `write` call; a partial write is an error
/// and is not retried.
pub struct ChannelNotifier<W: Write> {
    channels: HashMap<ChannelHandle, W>,
}

impl<W: Write> ChannelNotifier<W> {
    pub fn new() -> ChannelNotifier<W> {
        ChannelNotifier {
            channels: HashMap::new(),
        }
    }

    /// Registers the writer behind `channel`, returning the previous one
    pub fn register(&mut self, channel: ChannelHandle, writer: W) -> Option<W> {
        self.channels.insert(channel, writer)
    }

    pub fn channel(&self, channel: ChannelHandle) -> Option<&W> {
        self.channels.get(&channel)
    }
}

impl<W: Write> Default for ChannelNotifier<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> CompletionNotifier for ChannelNotifier<W> {
    fn notify(
        &mut self,
        channel: ChannelHandle,
        event: CompletionEvent,
    ) -> Result<(), NotifyError> {
        let writer = self
            .channels
            .get_mut(&channel)
            .ok_or(NotifyError::UnknownChannel(channel))?;

        let buf = event.encode()?;
        let written = writer.write(&buf)?;
        if written != buf.len() {
            return Err(NotifyError::ShortWrite {
                written,
                expected: buf.len(),
            });
        }

        writer.flush()?;
        Ok(())
    }
}

/// Notifier that keeps every event it receives, in delivery order
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<(ChannelHandle, CompletionEvent)>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog { events: Vec::new() }
    }

    pub fn events(&self) -> impl Iterator<Item = &CompletionEvent> {
        self.events.iter().map(|(_, event)| event)
    }

    pub fn deliveries(&self) -> &[(ChannelHandle, CompletionEvent)] {
        &self.events
    }

    pub fn find(&self, pid: Pid) -> Option<&CompletionEvent> {
        self.events().find(|event| event.pid == pid)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl CompletionNotifier for EventLog {
    fn notify(
        &mut self,
        channel: ChannelHandle,
        event: CompletionEvent,
    ) -> Result<(), NotifyError> {
        self.events.push((channel, event));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts at most `limit` bytes per write
    struct Throttled {
        limit: usize,
        data: Vec<u8>,
    }

    impl Write for Throttled {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn encode_layout() {
        let event = CompletionEvent::done(Pid::new(7), Timestamp::new(1200));

        let buf = event.encode().unwrap();

        assert_eq!(&buf[0..4], &7u32.to_le_bytes());
        assert_eq!(&buf[4..8], &1u32.to_le_bytes());
        assert_eq!(&buf[8..12], &1200u32.to_le_bytes());
        assert_eq!(CompletionEvent::decode(&buf), Some(event));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(CompletionEvent::decode(&[1, 0, 0]), None);

        let mut buf = CompletionEvent::done(Pid::new(1), Timestamp::new(5)).encode().unwrap();
        buf[4] = 9;
        assert_eq!(CompletionEvent::decode(&buf), None);
    }

    #[test]
    fn channel_notifier_writes_whole_message() {
        let mut notifier: ChannelNotifier<Vec<u8>> = ChannelNotifier::new();
        let channel = ChannelHandle::new(4);
        notifier.register(channel, Vec::new());

        let event = CompletionEvent::done(Pid::new(2), Timestamp::new(300));
        notifier.notify(channel, event).unwrap();

        assert_eq!(notifier.channel(channel).unwrap().as_slice(), &event.encode().unwrap());
    }

    #[test]
    fn unknown_channel_is_an_error() {
        let mut notifier: ChannelNotifier<Vec<u8>> = ChannelNotifier::new();

        let result = notifier.notify(
            ChannelHandle::new(9),
            CompletionEvent::done(Pid::new(1), Timestamp::new(0)),
        );

        assert!(matches!(
            result,
            Err(NotifyError::UnknownChannel(c)) if c == ChannelHandle::new(9)
        ));
    }

    #[test]
    fn partial_write_is_reported() {
        let mut notifier = ChannelNotifier::new();
        let channel = ChannelHandle::new(1);
        notifier.register(channel, Throttled { limit: 5, data: Vec::new() });

        let event = CompletionEvent::done(Pid::new(1), Timestamp::new(0));
        let result = notifier.notify(channel, event);

        match result {
            Err(NotifyError::ShortWrite { written, expected }) => {
                assert_eq!(written, 5);
                assert_eq!(expected, CompletionEvent::WIRE_SIZE);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn values_wider_than_the_wire_are_rejected() {
        let too_big = u32::MAX as usize + 1;

        let pid = CompletionEvent::done(Pid::new(too_big), Timestamp::new(0)).encode();
        assert!(matches!(pid, Err(NotifyError::OutOfRange { field: "pid", .. })));

        let time = CompletionEvent::done(Pid::new(1), Timestamp::new(too_big)).encode();
        assert!(matches!(time, Err(NotifyError::OutOfRange { field: "time", .. })));

        let mut notifier: ChannelNotifier<Vec<u8>> = ChannelNotifier::new();
        let channel = ChannelHandle::new(1);
        notifier.register(channel, Vec::new());
        let event = CompletionEvent::done(Pid::new(1), Timestamp::new(too_big));

        assert!(notifier.notify(channel, event).is_err());
        assert!(notifier.channel(channel).unwrap().is_empty());
    }
}
