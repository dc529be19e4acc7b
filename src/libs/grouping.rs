//! Grouping of maintenance entries with their addenda.
//!
//! A primary maintenance entry can be followed by "plus-added" addenda that
//! extend the same job. A group's duration is the primary's minutes plus the
//! minutes of every addendum pointing at it. Addenda whose primary no longer
//! exists (deleted, never created, or in another block) belong to no group
//! and add nothing to any total; [`Grouping::orphaned_addenda`] lists them.

use crate::libs::record::{MaintenanceRecord, ShiftRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// A primary entry, its addenda, and their combined duration.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceGroup<'a> {
    pub primary: &'a MaintenanceRecord,
    pub addenda: Vec<&'a MaintenanceRecord>,
    pub minutes: u32,
}

impl MaintenanceGroup<'_> {
    /// Detaches the group from the list it borrows.
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            primary: self.primary.clone(),
            addenda: self.addenda.iter().map(|a| (*a).clone()).collect(),
            minutes: self.minutes,
        }
    }
}

/// Owned form of [`MaintenanceGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSnapshot {
    pub primary: MaintenanceRecord,
    pub addenda: Vec<MaintenanceRecord>,
    pub minutes: u32,
}

pub trait Grouping {
    /// Groups of one block, ordered as the primaries appear in the list.
    fn group_block(&self, block: u32) -> Vec<MaintenanceGroup<'_>>;

    /// Groups of every block, block by block.
    fn groups(&self) -> Vec<MaintenanceGroup<'_>>;

    /// Distinct block indices present, ascending.
    fn blocks(&self) -> Vec<u32>;

    /// Addenda that no group picks up.
    fn orphaned_addenda(&self) -> Vec<&MaintenanceRecord>;
}

impl Grouping for [MaintenanceRecord] {
    fn group_block(&self, block: u32) -> Vec<MaintenanceGroup<'_>> {
        let (addenda, primaries): (Vec<&MaintenanceRecord>, Vec<&MaintenanceRecord>) =
            self.iter().filter(|r| r.block() == block).partition(|r| r.is_addendum());

        primaries
            .into_iter()
            .map(|primary| {
                let members: Vec<&MaintenanceRecord> =
                    addenda.iter().copied().filter(|a| a.addendum_of == Some(primary.id)).collect();
                let minutes = members.iter().fold(primary.minutes(), |total, a| total.saturating_add(a.minutes()));
                MaintenanceGroup {
                    primary,
                    addenda: members,
                    minutes,
                }
            })
            .collect()
    }

    fn groups(&self) -> Vec<MaintenanceGroup<'_>> {
        self.blocks().into_iter().flat_map(|block| self.group_block(block)).collect()
    }

    fn blocks(&self) -> Vec<u32> {
        self.iter().map(|r| r.block()).collect::<BTreeSet<_>>().into_iter().collect()
    }

    fn orphaned_addenda(&self) -> Vec<&MaintenanceRecord> {
        self.iter()
            .filter(|r| r.is_addendum())
            .filter(|a| {
                !self
                    .iter()
                    .any(|p| !p.is_addendum() && Some(p.id) == a.addendum_of && p.block() == a.block())
            })
            .collect()
    }
}
