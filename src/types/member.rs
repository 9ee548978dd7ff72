use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Input of `save_member`. Without an id the member is inserted and gets a
/// generated one; with an id the stored row is updated or created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub id: Option<i32>,
    pub user_name: String,
    pub age: i32,
    pub team_id: Option<i32>,
}

impl MemberDraft {
    pub fn new(user_name: impl Into<String>, age: i32) -> Self {
        Self { id: None, user_name: user_name.into(), age, team_id: None }
    }

    pub fn in_team(mut self, team_id: i32) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

// Edit-and-save: mutate a loaded member's fields, then hand it back to save_member.
impl From<entity::member::Model> for MemberDraft {
    fn from(m: entity::member::Model) -> Self {
        Self { id: Some(m.id), user_name: m.user_name, age: m.age, team_id: m.team_id }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: i32,
    pub user_name: String,
    pub team_name: Option<String>,
}

impl MemberDto {
    pub fn from_parts(m: &entity::member::Model, team: Option<&entity::team::Model>) -> Self {
        Self { id: m.id, user_name: m.user_name.clone(), team_name: team.map(|t| t.name.clone()) }
    }
}

/// Root-level projection, only `user_name` is selected.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct UserNameOnly {
    pub user_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamNameOnly {
    pub name: String,
}

/// Projection reaching into the member's team. Needs the member/team join,
/// unlike [`UserNameOnly`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NestedClosedProjection {
    pub user_name: String,
    pub team: Option<TeamNameOnly>,
}

/// Conjunctive member filter; `None` criteria are left out of the query.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearch {
    pub user_name: Option<String>,
    pub age: Option<i32>,
    pub team_name: Option<String>,
}

impl MemberSearch {
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }
}
