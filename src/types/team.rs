use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub id: Option<i32>,
    pub name: String,
}

impl TeamDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into() }
    }
}

impl From<entity::team::Model> for TeamDraft {
    fn from(t: entity::team::Model) -> Self {
        Self { id: Some(t.id), name: t.name }
    }
}
