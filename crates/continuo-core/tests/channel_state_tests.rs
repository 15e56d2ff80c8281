use continuo_core::{ChannelMap, CHANNELS, PROGRAM_UNSET};

fn gm_map() -> ChannelMap {
    ChannelMap::new(vec![120, 128])
}

#[test]
fn channels_start_unset_and_melodic() {
    let map = gm_map();
    for channel in 0..CHANNELS as u8 {
        let record = map.record(channel);
        assert_eq!(record.program, PROGRAM_UNSET);
        assert_eq!(record.bank(), 0);
        assert!(!record.is_drum);
    }
}

#[test]
fn bank_composes_from_msb_and_lsb() {
    let map = gm_map();
    map.update_bank(4, true, 1);
    map.update_bank(4, false, 2);
    let update = map.update_program(4, 5);

    assert_eq!(update.bank, (1 << 7) | 2);
    let record = map.record(4);
    assert_eq!(record.bank(), 130);
    assert_eq!(record.program, 5);
}

#[test]
fn drum_classification_follows_configured_banks() {
    let map = gm_map();
    map.update_bank(0, true, 1); // bank 128
    let update = map.update_program(0, 0);
    assert!(update.is_drum);
    assert!(update.drum_flipped);

    // Same bank again: classification is stable, no flip.
    let update = map.update_program(0, 3);
    assert!(update.is_drum);
    assert!(!update.drum_flipped);

    // Back to a melodic bank.
    map.update_bank(0, true, 0);
    let update = map.update_program(0, 3);
    assert!(!update.is_drum);
    assert!(update.drum_flipped);
}

#[test]
fn drum_banks_are_configuration_not_constants() {
    let map = ChannelMap::new(vec![7]);
    map.update_bank(1, false, 7);
    assert!(map.update_program(1, 0).is_drum);

    map.update_bank(1, true, 1); // bank 135, not configured
    assert!(!map.update_program(1, 0).is_drum);
}

#[test]
fn select_overwrites_the_whole_record() {
    let map = gm_map();
    map.select(9, 128, 0, true);
    let record = map.record(9);
    assert_eq!(record.bank(), 128);
    assert_eq!(record.bank_msb, 1);
    assert_eq!(record.bank_lsb, 0);
    assert_eq!(record.program, 0);
    assert!(record.is_drum);
}

#[test]
fn snapshot_covers_all_sixteen_channels() {
    let map = gm_map();
    map.select(15, 1, 2, false);
    let snapshot = map.snapshot();
    assert_eq!(snapshot.len(), CHANNELS);
    assert_eq!(snapshot[15].program, 2);
    assert_eq!(snapshot[0].program, PROGRAM_UNSET);
}
