//! Bay model.
//!
//! A bay is a manufacturing resource unit that hosts projects over
//! calendar time. Bays are split into a fixed number of lanes (rows) so
//! that several schedules can be drawn side by side.
//!
//! Bays belong to a team for display purposes only; the grouping is
//! derived from the `team` label and never stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bay identifier.
pub type BayId = i64;

/// A manufacturing bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bay {
    /// Unique bay identifier.
    pub id: BayId,
    /// Display name.
    pub name: String,
    /// Sequence number used for ordering within a team.
    pub bay_number: i32,
    /// Team/group label (`None` = ungrouped).
    #[serde(default)]
    pub team: Option<String>,
    /// Inactive bays are skipped by slot generation and reject placements.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A team and its bays, as shown on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGroup<'a> {
    /// Team label; `None` for bays without a team.
    pub team: Option<&'a str>,
    /// Bays in bay-number order.
    pub bays: Vec<&'a Bay>,
}

impl Bay {
    /// Creates an active bay with no team.
    pub fn new(id: BayId, bay_number: i32) -> Self {
        Self {
            id,
            name: format!("Bay {bay_number}"),
            bay_number,
            team: None,
            is_active: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the team label.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Marks the bay inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Groups bays by team.
///
/// Named teams come first in name order, followed by a single group of
/// ungrouped bays. Inside each group bays are ordered by `bay_number`,
/// then by id.
pub fn group_bays_by_team(bays: &[Bay]) -> Vec<TeamGroup<'_>> {
    let mut named: BTreeMap<&str, Vec<&Bay>> = BTreeMap::new();
    let mut ungrouped: Vec<&Bay> = Vec::new();

    for bay in bays {
        match bay.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(team) => named.entry(team).or_default().push(bay),
            None => ungrouped.push(bay),
        }
    }

    let mut groups: Vec<TeamGroup<'_>> = named
        .into_iter()
        .map(|(team, bays)| TeamGroup {
            team: Some(team),
            bays,
        })
        .collect();
    if !ungrouped.is_empty() {
        groups.push(TeamGroup {
            team: None,
            bays: ungrouped,
        });
    }

    for group in &mut groups {
        group.bays.sort_by_key(|b| (b.bay_number, b.id));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bay_builder() {
        let bay = Bay::new(3, 7).with_name("Assembly 7").with_team("Chassis");
        assert_eq!(bay.id, 3);
        assert_eq!(bay.bay_number, 7);
        assert_eq!(bay.name, "Assembly 7");
        assert_eq!(bay.team.as_deref(), Some("Chassis"));
        assert!(bay.is_active);
        assert!(!bay.inactive().is_active);
    }

    #[test]
    fn test_default_name() {
        assert_eq!(Bay::new(1, 4).name, "Bay 4");
    }

    #[test]
    fn test_group_by_team() {
        let bays = vec![
            Bay::new(1, 3).with_team("Paint"),
            Bay::new(2, 1).with_team("Chassis"),
            Bay::new(3, 1).with_team("Paint"),
            Bay::new(4, 9),
            Bay::new(5, 2).with_team("  "),
        ];

        let groups = group_bays_by_team(&bays);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].team, Some("Chassis"));
        assert_eq!(groups[1].team, Some("Paint"));
        let paint: Vec<_> = groups[1].bays.iter().map(|b| b.id).collect();
        assert_eq!(paint, vec![3, 1]);
        assert_eq!(groups[2].team, None);
        let loose: Vec<_> = groups[2].bays.iter().map(|b| b.id).collect();
        assert_eq!(loose, vec![5, 4]);
    }

    #[test]
    fn test_deserialize_defaults_active() {
        let bay: Bay = serde_json::from_str(r#"{"id":1,"name":"B1","bayNumber":1}"#).unwrap();
        assert!(bay.is_active);
        assert!(bay.team.is_none());
    }
}
