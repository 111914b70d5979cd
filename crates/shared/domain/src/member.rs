//! Team, member and locker entities.

use serde::{Deserialize, Serialize};

use crate::fetch::{Collection, Entity, Reference};

/// Team owning a collection of members.
///
/// Saving a team saves the members of a loaded collection; deleting a team
/// deletes every member stored with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<i32>,
    pub team_name: String,
    pub members: Collection<Member>,
}

impl Team {
    /// Create a transient team with an empty loaded member collection
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            id: None,
            team_name: team_name.into(),
            members: Collection::default(),
        }
    }

    /// Add a member to the owned collection
    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }
}

impl Entity for Team {
    fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Member with an optional team and an optional locker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Option<i32>,
    pub username: String,
    pub team: Option<Reference<Team>>,
    pub locker: Option<Reference<Locker>>,
}

impl Member {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            team: None,
            locker: None,
        }
    }

    pub fn with_team(mut self, team: Reference<Team>) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_locker(mut self, locker: Reference<Locker>) -> Self {
        self.locker = Some(locker);
        self
    }

    /// Identifier of the referenced team, if any
    pub fn team_id(&self) -> Option<i32> {
        self.team.as_ref().and_then(Reference::id)
    }

    /// Identifier of the referenced locker, if any
    pub fn locker_id(&self) -> Option<i32> {
        self.locker.as_ref().and_then(Reference::id)
    }
}

impl Entity for Member {
    fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Locker assigned to at most one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locker {
    pub id: Option<i32>,
    pub name: String,
}

impl Locker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Entity for Locker {
    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_member_keeps_collection_loaded() {
        let mut team = Team::new("team");
        team.add_member(Member::new("ruby1"));
        team.add_member(Member::new("ruby2"));

        let names: Vec<_> = team
            .members
            .get()
            .unwrap()
            .iter()
            .map(|m| m.username.as_str())
            .collect();
        assert_eq!(names, vec!["ruby1", "ruby2"]);
    }

    #[test]
    fn team_id_follows_reference() {
        let mut team = Team::new("team");
        let member = Member::new("ruby").with_team(Reference::loaded(team.clone()));
        assert_eq!(member.team_id(), None);

        team.id = Some(4);
        let member = member.with_team(Reference::loaded(team));
        assert_eq!(member.team_id(), Some(4));
        assert_eq!(Member::new("solo").team_id(), None);
    }
}
