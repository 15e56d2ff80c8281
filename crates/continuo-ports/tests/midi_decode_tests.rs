use continuo_ports::engine::EngineEvent;
use continuo_ports::midi::RawMidiEvent;

fn ev(frame: u32, bytes: &[u8]) -> RawMidiEvent {
    RawMidiEvent::new(frame, bytes)
}

#[test]
fn decodes_channel_voice_messages() {
    assert_eq!(
        ev(0, &[0x92, 60, 100]).decode(),
        Some(EngineEvent::NoteOn {
            channel: 2,
            key: 60,
            velocity: 100
        })
    );
    assert_eq!(
        ev(0, &[0x81, 60, 0]).decode(),
        Some(EngineEvent::NoteOff {
            channel: 1,
            key: 60,
            velocity: 0
        })
    );
    assert_eq!(
        ev(0, &[0xB0, 7, 99]).decode(),
        Some(EngineEvent::ControlChange {
            channel: 0,
            control: 7,
            value: 99
        })
    );
    assert_eq!(
        ev(0, &[0xC5, 42]).decode(),
        Some(EngineEvent::ProgramChange {
            channel: 5,
            program: 42
        })
    );
    assert_eq!(
        ev(0, &[0xD9, 33]).decode(),
        Some(EngineEvent::ChannelPressure {
            channel: 9,
            pressure: 33
        })
    );
}

#[test]
fn pitch_bend_packs_two_data_bytes() {
    let event = ev(0, &[0xE3, 0x01, 0x40]).decode();
    assert_eq!(
        event,
        Some(EngineEvent::PitchBend {
            channel: 3,
            value: (0x40 << 7) | 0x01
        })
    );
}

#[test]
fn rejects_system_and_malformed_messages() {
    // System exclusive and realtime statuses are not channel voice.
    assert_eq!(ev(0, &[0xF0, 1, 2]).decode(), None);
    assert_eq!(ev(0, &[0xF8]).decode(), None);
    // Running status (first byte below 0x80) is not supported.
    assert_eq!(ev(0, &[60, 100]).decode(), None);
    // Truncated messages.
    assert_eq!(ev(0, &[0x90, 60]).decode(), None);
    assert_eq!(ev(0, &[0xB0]).decode(), None);
    // Over-long events keep their length and refuse to decode.
    let long = ev(0, &[0xB0, 0, 0, 0]);
    assert_eq!(long.len, 4);
    assert_eq!(long.decode(), None);
}

#[test]
fn new_truncates_data_but_keeps_reported_length() {
    let event = RawMidiEvent::new(7, &[0x90, 60, 100, 9, 9]);
    assert_eq!(event.frame, 7);
    assert_eq!(event.len, 5);
    assert_eq!(event.data, [0x90, 60, 100]);
}
