//! Best-effort outcomes
//!
//! Bus and radio failures never abort a wake cycle. Instead of threading
//! `Result`s through the cycle, each operation's result is settled into a
//! plain success flag and tallied. Reports carry the tallies so the firmware
//! can log them; nothing is required to act on them.

/// Fire-and-forget settlement of an operation result
pub trait BestEffort {
    /// Consume the result and report whether it succeeded
    fn settle(self) -> bool;
}

impl<T, E> BestEffort for Result<T, E> {
    fn settle(self) -> bool {
        self.is_ok()
    }
}

/// Count of attempted and failed operations in one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tally {
    pub attempted: u8,
    pub failed: u8,
}

impl Tally {
    /// Record one settled operation
    pub fn record(&mut self, ok: bool) {
        self.attempted = self.attempted.saturating_add(1);
        if !ok {
            self.failed = self.failed.saturating_add(1);
        }
    }

    /// Number of operations that succeeded
    pub fn succeeded(&self) -> u8 {
        self.attempted - self.failed
    }

    /// Check that nothing failed
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Radio bring-up step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    StationMode,
    TxPower,
    Channel,
    Peer,
}

/// What the transmitter did this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitOutcome {
    /// Cold boot; the radio was never touched
    Skipped,
    /// Bring-up failed; no payload was sent
    Abandoned(InitStep),
    /// Burst attempted; `failed` counts sends the radio refused to queue
    Sent(Tally),
}

impl TransmitOutcome {
    /// Number of payloads handed to the radio
    pub fn payloads_queued(&self) -> u8 {
        match self {
            TransmitOutcome::Sent(tally) => tally.succeeded(),
            _ => 0,
        }
    }
}
