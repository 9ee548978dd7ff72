use actix_web::{web, App};
use std::sync::Arc;
use member_registry::{
    db::repository::Repository,
    types::member::MemberDraft,
    types::team::TeamDraft,
};
use entity::{member::Model as MemberModel, team::Model as TeamModel};

pub struct TestClient {
    pub db: Arc<Repository>,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(db: Arc<Repository>) -> Self {
        TestClient { db }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .configure(member_registry::routes::configure_routes)
    }

    pub async fn create_member(&self, name: &str, age: i32) -> MemberModel {
        self.db.save_member(MemberDraft::new(name, age))
            .await
            .expect("Failed to save member")
    }

    pub async fn create_team(&self, name: &str) -> TeamModel {
        self.db.save_team(TeamDraft::new(name))
            .await
            .expect("Failed to save team")
    }

    pub async fn create_member_in_team(&self, name: &str, age: i32, team_id: i32) -> MemberModel {
        self.db.save_member(MemberDraft::new(name, age).in_team(team_id))
            .await
            .expect("Failed to save member")
    }
}
