use bestiary_types::{CapabilityKind, EnemyRecord};

/// Per-group permission to update individual fields, in canonical group order
/// (Ranged, Healer, Barrier, Cloak, Spawner)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialUpdateAllowance([bool; 5]);

impl PartialUpdateAllowance {
    pub fn from_flags(flags: [bool; 5]) -> Self {
        Self(flags)
    }

    pub fn allows(&self, kind: CapabilityKind) -> bool {
        self.0[index(kind)]
    }

    pub fn flags(&self) -> [bool; 5] {
        self.0
    }
}

fn index(kind: CapabilityKind) -> usize {
    match kind {
        CapabilityKind::Ranged => 0,
        CapabilityKind::Healer => 1,
        CapabilityKind::Barrier => 2,
        CapabilityKind::Cloak => 3,
        CapabilityKind::Spawner => 4,
    }
}

/// A group may be edited field by field only when the stored record already
/// carries it in full. Absent groups must be supplied whole, so an update can
/// never leave one half-filled.
pub fn detect_allowed_partial_updates(existing: &EnemyRecord) -> PartialUpdateAllowance {
    let mut flags = [false; 5];
    for kind in CapabilityKind::ALL {
        flags[index(kind)] = existing.capabilities.is_present(kind);
    }
    PartialUpdateAllowance(flags)
}
