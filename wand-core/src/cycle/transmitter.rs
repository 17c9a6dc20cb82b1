//! Burst transmission of the motion event
//!
//! The radio link is unacknowledged. Sending the same payload several times
//! is the only reliability mechanism; the receiver debounces duplicates.

use wand_hal::Clock;
use wand_protocol::MotionEvent;

use crate::config::WandConfig;
use crate::outcome::{BestEffort, InitStep, Tally, TransmitOutcome};
use crate::traits::DatagramRadio;

/// Bring the radio up, send the toggle event in a burst, power it off
///
/// A bring-up failure abandons the burst. The radio is powered off on
/// every path.
pub fn transmit_burst<R, C>(radio: &mut R, clock: &mut C, config: &WandConfig) -> TransmitOutcome
where
    R: DatagramRadio,
    C: Clock,
{
    let outcome = match bring_up(radio, config) {
        Ok(()) => TransmitOutcome::Sent(send_burst(radio, clock, config)),
        Err(step) => TransmitOutcome::Abandoned(step),
    };

    radio.power_off();
    outcome
}

fn bring_up<R: DatagramRadio>(radio: &mut R, config: &WandConfig) -> Result<(), InitStep> {
    radio
        .start_station()
        .map_err(|_| InitStep::StationMode)?;

    // Nothing to drop on a fresh boot; a failure here is expected
    radio.disconnect().settle();

    radio
        .set_tx_power(config.radio.tx_power_quarter_dbm)
        .map_err(|_| InitStep::TxPower)?;
    radio
        .set_channel(config.peer.channel())
        .map_err(|_| InitStep::Channel)?;
    radio.add_peer(&config.peer).map_err(|_| InitStep::Peer)?;

    Ok(())
}

fn send_burst<R, C>(radio: &mut R, clock: &mut C, config: &WandConfig) -> Tally
where
    R: DatagramRadio,
    C: Clock,
{
    // Wraps after ~49 days of uptime, same as the receiver expects
    let event = MotionEvent::toggle(clock.uptime_ms() as u32);
    let payload = event.encode();
    let to = config.peer.address();

    let mut tally = Tally::default();
    for _ in 0..config.burst.count {
        tally.record(radio.send(&to, &payload).settle());
        clock.wait_at_least_ms(config.burst.spacing_ms);
    }
    tally
}
