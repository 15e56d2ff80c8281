use crate::catalog::PatchCatalog;
use crate::channel_state::{ChannelMap, ChannelRecord, CHANNELS};
use parking_lot::Mutex;
use std::fmt::Write;
use std::sync::Arc;

const CONTROL_NAMES: &[(u8, &str)] = &[
    (1, "Modulation"),
    (2, "Breath"),
    (5, "Portamento Time"),
    (7, "Channel Volume"),
    (8, "Stereo Balance"),
    (10, "Pan"),
    (11, "Expression"),
    (37, "Portamento Time (Fine)"),
    (64, "Sustain On/Off"),
    (65, "Portamento On/Off"),
    (66, "Sostenuto On/Off"),
    (68, "Legato On/Off"),
    (91, "Reverb"),
    (93, "Chorus"),
];

const DRUM_NOTE_NAMES: &[(u8, &str)] = &[
    (35, "Bass Drum 2"),
    (36, "Bass Drum 1"),
    (37, "Side Stick/Rimshot"),
    (38, "Snare Drum 1"),
    (39, "Hand Clap"),
    (40, "Snare Drum 2"),
    (41, "Low Tom 2"),
    (42, "Closed Hi-hat"),
    (43, "Low Tom 1"),
    (44, "Pedal Hi-hat"),
    (45, "Mid Tom 2"),
    (46, "Open Hi-hat"),
    (47, "Mid Tom 1"),
    (48, "High Tom 2"),
    (49, "Crash Cymbal 1"),
    (50, "High Tom 1"),
    (51, "Ride Cymbal 1"),
    (52, "Chinese Cymbal"),
    (53, "Ride Bell"),
    (54, "Tambourine"),
    (55, "Splash Cymbal"),
    (56, "Cowbell"),
    (57, "Crash Cymbal 2"),
    (58, "Vibra Slap"),
    (59, "Ride Cymbal 2"),
    (60, "High Bongo"),
    (61, "Low Bongo"),
    (62, "Mute High Conga"),
    (63, "Open High Conga"),
    (64, "Low Conga"),
    (65, "High Timbale"),
    (66, "Low Timbale"),
    (67, "High Agog\u{f4}"),
    (68, "Low Agog\u{f4}"),
    (69, "Cabasa"),
    (70, "Maracas"),
    (71, "Short Whistle"),
    (72, "Long Whistle"),
    (73, "Short G\u{fc}iro"),
    (74, "Long G\u{fc}iro"),
    (75, "Claves"),
    (76, "High Wood Block"),
    (77, "Low Wood Block"),
    (78, "Mute Cu\u{ed}ca"),
    (79, "Open Cu\u{ed}ca"),
    (80, "Mute Triangle"),
    (81, "Open Triangle"),
];

/// Query-boundary view of the plugin: callable from any thread, outside
/// the audio path. Channel records are read lock-free (slightly stale is
/// acceptable); the catalog lock is held only for the duration of the
/// document read.
#[derive(Clone)]
pub struct NamingQuery {
    channels: Arc<ChannelMap>,
    catalog: Arc<Mutex<PatchCatalog>>,
    model: String,
}

impl NamingQuery {
    pub(crate) fn new(
        channels: Arc<ChannelMap>,
        catalog: Arc<Mutex<PatchCatalog>>,
        model: String,
    ) -> Self {
        Self {
            channels,
            catalog,
            model,
        }
    }

    /// Build the complete MIDNAM device description. Always produces a
    /// self-consistent document: either the pre- or post-reload catalog
    /// in full, never a mixture.
    pub fn document(&self) -> String {
        let channels = self.channels.snapshot();
        let catalog = self.catalog.lock();
        render_document(&self.model, &channels, &catalog)
    }

    pub fn model(&self) -> String {
        self.model.clone()
    }
}

fn render_document(
    model: &str,
    channels: &[ChannelRecord; CHANNELS],
    catalog: &PatchCatalog,
) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<!DOCTYPE MIDINameDocument PUBLIC \"-//MIDI Manufacturers Association//DTD MIDINameDocument 1.0//EN\" \"http://dev.midi.org/dtds/MIDINameDocument10.dtd\">\n",
    );
    out.push_str("<MIDINameDocument>\n");
    out.push_str("  <Author/>\n");
    out.push_str("  <MasterDeviceNames>\n");
    out.push_str("    <Manufacturer>Continuo</Manufacturer>\n");
    let _ = writeln!(out, "    <Model>{model}</Model>");

    out.push_str("    <CustomDeviceMode Name=\"Default\">\n");
    out.push_str("      <ChannelNameSetAssignments>\n");
    for (index, record) in channels.iter().enumerate() {
        let set = if record.is_drum { "GM Drums" } else { "GM Notes" };
        let _ = writeln!(
            out,
            "        <ChannelNameSetAssign Channel=\"{}\" NameSet=\"{set}\"/>",
            index + 1
        );
    }
    out.push_str("      </ChannelNameSetAssignments>\n");
    out.push_str("    </CustomDeviceMode>\n");

    write_channel_name_set(&mut out, "GM Notes", channels, catalog, false);
    write_channel_name_set(&mut out, "GM Drums", channels, catalog, true);
    write_patch_name_lists(&mut out, catalog);
    write_control_name_list(&mut out);
    write_drum_note_names(&mut out);

    out.push_str("  </MasterDeviceNames>\n");
    out.push_str("</MIDINameDocument>");
    out
}

fn write_channel_name_set(
    out: &mut String,
    name: &str,
    channels: &[ChannelRecord; CHANNELS],
    catalog: &PatchCatalog,
    drums: bool,
) {
    let _ = writeln!(out, "    <ChannelNameSet Name=\"{name}\">");
    out.push_str("      <AvailableForChannels>\n");
    for (index, record) in channels.iter().enumerate() {
        if record.is_drum == drums {
            let _ = writeln!(
                out,
                "        <AvailableChannel Channel=\"{}\" Available=\"true\"/>",
                index + 1
            );
        }
    }
    out.push_str("      </AvailableForChannels>\n");
    out.push_str("      <UsesControlNameList Name=\"Controls\"/>\n");
    if drums {
        out.push_str("      <UsesNoteNameList Name=\"General MIDI Drums\"/>\n");
    }

    for bank in catalog.banks() {
        let _ = writeln!(out, "      <PatchBank Name=\"Patch Bank {}\">", bank.bank);
        out.push_str("        <MIDICommands>\n");
        let _ = writeln!(
            out,
            "            <ControlChange Control=\"0\" Value=\"{}\"/>",
            (bank.bank >> 7) & 127
        );
        let _ = writeln!(
            out,
            "            <ControlChange Control=\"32\" Value=\"{}\"/>",
            bank.bank & 127
        );
        out.push_str("        </MIDICommands>\n");
        if !bank.programs.is_empty() {
            let _ = writeln!(
                out,
                "      <UsesPatchNameList Name=\"Patch Bank Names {}\"/>",
                bank.bank
            );
        }
        out.push_str("      </PatchBank>\n");
    }
    out.push_str("    </ChannelNameSet>\n");
}

fn write_patch_name_lists(out: &mut String, catalog: &PatchCatalog) {
    for bank in catalog.banks() {
        if bank.programs.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "    <PatchNameList Name=\"Patch Bank Names {}\">",
            bank.bank
        );
        for (index, program) in bank.programs.iter().enumerate() {
            let _ = writeln!(
                out,
                "      <Patch Number=\"{index}\" Name=\"{}\" ProgramChange=\"{}\"/>",
                program.name, program.program
            );
        }
        out.push_str("    </PatchNameList>\n");
    }
}

fn write_control_name_list(out: &mut String) {
    out.push_str("    <ControlNameList Name=\"Controls\">\n");
    for (number, name) in CONTROL_NAMES {
        let _ = writeln!(
            out,
            "       <Control Type=\"7bit\" Number=\"{number}\" Name=\"{name}\"/>"
        );
    }
    out.push_str("    </ControlNameList>\n");
}

fn write_drum_note_names(out: &mut String) {
    out.push_str("    <NoteNameList Name=\"General MIDI Drums\">\n");
    for (number, name) in DRUM_NOTE_NAMES {
        let _ = writeln!(out, "      <Note Number=\"{number}\" Name=\"{name}\"/>");
    }
    out.push_str("    </NoteNameList>\n");
}
