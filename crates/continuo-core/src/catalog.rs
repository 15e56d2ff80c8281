use continuo_ports::engine::PresetInfo;

/// Replace characters that would break the naming document's quoting:
/// `"` becomes `'` and `&` becomes its entity form. Nothing else changes.
pub fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '"' => out.push('\''),
            '&' => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramEntry {
    pub name: String,
    pub program: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankEntry {
    pub bank: u16,
    pub programs: Vec<ProgramEntry>,
}

/// Bank -> program index of the currently loaded instrument bank.
///
/// Banks keep first-encounter order, not numeric order; the order is
/// observable in the naming document. Rebuilt from scratch on every load
/// and swapped in whole under the owning mutex, so a reader never sees a
/// half-populated sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchCatalog {
    banks: Vec<BankEntry>,
}

impl PatchCatalog {
    pub fn from_presets(presets: &[PresetInfo]) -> Self {
        let mut catalog = Self::default();
        for preset in presets {
            catalog.add(preset.bank, &preset.name, preset.program);
        }
        catalog
    }

    fn add(&mut self, bank: u16, name: &str, program: u8) {
        let index = match self.banks.iter().position(|entry| entry.bank == bank) {
            Some(index) => index,
            None => {
                self.banks.push(BankEntry {
                    bank,
                    programs: Vec::new(),
                });
                self.banks.len() - 1
            }
        };
        self.banks[index].programs.push(ProgramEntry {
            name: escape_name(name),
            program,
        });
    }

    pub fn banks(&self) -> &[BankEntry] {
        &self.banks
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}
