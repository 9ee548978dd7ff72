use std::sync::Arc;
use member_registry::db::repository::Repository;

pub mod client;

pub struct TestContext {
    pub db: Arc<Repository>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let db = Arc::new(
            Repository::new("sqlite::memory:")
                .await
                .expect("Failed to initialize Repository")
        );

        TestContext { db }
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use member_registry::types::member::MemberDraft;
    use member_registry::types::team::TeamDraft;

    pub fn member(name: &str, age: i32) -> MemberDraft {
        MemberDraft::new(name, age)
    }

    pub fn member_in_team(name: &str, age: i32, team_id: i32) -> MemberDraft {
        MemberDraft::new(name, age).in_team(team_id)
    }

    pub fn team(name: &str) -> TeamDraft {
        TeamDraft::new(name)
    }
}
