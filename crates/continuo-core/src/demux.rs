use crate::channel_state::ChannelMap;
use continuo_ports::engine::{EngineEvent, SynthEngine};
use continuo_ports::host::{BankPatchNotifier, NamesChangedNotifier};
use continuo_ports::midi::{RawMidiEvent, CC_BANK_LSB, CC_BANK_MSB};

/// Notification sinks the demultiplexer may touch while processing a block.
#[derive(Clone, Copy, Default)]
pub struct NotifySinks<'a> {
    pub bank_patch: Option<&'a dyn BankPatchNotifier>,
    pub names: Option<&'a dyn NamesChangedNotifier>,
}

/// Render one block, interleaving events at their frame offsets.
///
/// Audio up to each event's offset is rendered from the engine state
/// before that event is applied; zero-length sub-blocks are legal no-ops.
/// Events that are over-long, out of range, or undecodable are dropped
/// without touching channel state. Audio continuity wins over reporting.
pub fn process_block(
    engine: &dyn SynthEngine,
    channels: &ChannelMap,
    notify: NotifySinks<'_>,
    events: &[RawMidiEvent],
    out_l: &mut [f32],
    out_r: &mut [f32],
) {
    let frames = out_l.len().min(out_r.len());
    let mut cursor = 0usize;

    for event in events {
        if event.len > 3 || event.frame as usize >= frames {
            continue;
        }
        let Some(decoded) = event.decode() else {
            continue;
        };

        let frame = event.frame as usize;
        if frame > cursor {
            engine.render(&mut out_l[cursor..frame], &mut out_r[cursor..frame]);
            cursor = frame;
        }

        track_channel_state(channels, notify, decoded);
        engine.handle_event(decoded);
    }

    if cursor < frames {
        engine.render(&mut out_l[cursor..frames], &mut out_r[cursor..frames]);
    }
}

/// Bank selects update state silently; only a program change commits the
/// bank, notifies the host, and may reclassify the channel as a drum kit.
fn track_channel_state(channels: &ChannelMap, notify: NotifySinks<'_>, event: EngineEvent) {
    match event {
        EngineEvent::ControlChange {
            channel,
            control: CC_BANK_MSB,
            value,
        } => {
            channels.update_bank(channel, true, value);
        }
        EngineEvent::ControlChange {
            channel,
            control: CC_BANK_LSB,
            value,
        } => {
            channels.update_bank(channel, false, value);
        }
        EngineEvent::ProgramChange { channel, program } => {
            let update = channels.update_program(channel, program);
            if let Some(bank_patch) = notify.bank_patch {
                bank_patch.notify_program_change(channel, update.bank, program);
            }
            if update.drum_flipped {
                if let Some(names) = notify.names {
                    names.notify_names_changed();
                }
            }
        }
        _ => {}
    }
}
