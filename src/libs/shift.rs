//! Shift labels and the typed identifiers shift data is partitioned by.
//!
//! Every record list, block list and equipment note belongs to exactly one
//! shift ("team"). Switching the shift swaps the whole visible data set; the
//! partitions never merge.

use crate::libs::error::EntryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one 8-hour shift.
pub const SHIFT_MINUTES: u32 = 480;

/// One of the three work groups whose data is kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Shift {
    #[default]
    A,
    B,
    C,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::A, Shift::B, Shift::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::A => "A",
            Shift::B => "B",
            Shift::C => "C",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Shift::A),
            "B" => Ok(Shift::B),
            "C" => Ok(Shift::C),
            _ => Err(EntryError::UnknownShift(s.to_string())),
        }
    }
}

/// Identifier of a process (a station in the floor layout).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

/// Identifier of an equipment unit placed on the floor layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(ProcessId);
string_id!(EquipmentId);

/// Which record list of a process a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Maintenance,
    Downtime,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Maintenance => "maintenance",
            RecordKind::Downtime => "downtime",
        }
    }
}

/// Plain-string notes kept per equipment unit and shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentField {
    Memo,
    Material,
    Status,
}

impl EquipmentField {
    pub const ALL: [EquipmentField; 3] = [EquipmentField::Memo, EquipmentField::Material, EquipmentField::Status];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentField::Memo => "memo",
            EquipmentField::Material => "material",
            EquipmentField::Status => "status",
        }
    }
}

impl FromStr for EquipmentField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown equipment field '{}' (memo, material, status)", s))
    }
}

/// Partition under which one record list is stored.
///
/// Maintenance and downtime lists of the same process and shift live under
/// different keys and are read independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShiftKey {
    pub process: ProcessId,
    pub kind: RecordKind,
    pub shift: Shift,
}

impl ShiftKey {
    pub fn new(process: ProcessId, kind: RecordKind, shift: Shift) -> Self {
        Self { process, kind, shift }
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process_{}_{}_{}", self.process, self.kind.as_str(), self.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_parses_case_insensitively() {
        assert_eq!("b".parse::<Shift>().unwrap(), Shift::B);
        assert_eq!(" C ".parse::<Shift>().unwrap(), Shift::C);
        assert_eq!("D".parse::<Shift>(), Err(EntryError::UnknownShift("D".to_string())));
    }

    #[test]
    fn shift_key_renders_legacy_layout() {
        let key = ShiftKey::new(ProcessId::new("P1"), RecordKind::Maintenance, Shift::A);
        assert_eq!(key.to_string(), "process_P1_maintenance_A");

        let key = ShiftKey::new(ProcessId::new("7"), RecordKind::Downtime, Shift::C);
        assert_eq!(key.to_string(), "process_7_downtime_C");
    }
}
