use std::fmt;

/// Discrete brightness tier reported to the matrix server.
///
/// The numeric weight is the value carried on the wire, not an internal
/// scale; the server maps it to a panel brightness itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    None,
    Low,
    Medium,
    High,
}

impl Brightness {
    /// Weight sent in the notification payload.
    pub fn weight(self) -> u8 {
        match self {
            Brightness::None => 0,
            Brightness::Low => 10,
            Brightness::Medium => 50,
            Brightness::High => 85,
        }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weight())
    }
}

/// Mutable state owned by the polling loop.
///
/// `last_reading` starts at a sentinel far outside the sensor's range so the
/// very first reading always falls outside the dead-band. Both tiers start
/// at `None`, so the first accepted reading always counts as a transition
/// and gets reported, whatever tier it lands on.
#[derive(Debug, Clone)]
pub struct PollState {
    pub previous: Brightness,
    pub current: Brightness,
    pub last_reading: i32,
}

impl PollState {
    pub fn new() -> Self {
        PollState {
            previous: Brightness::None,
            current: Brightness::None,
            last_reading: -100,
        }
    }
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}
