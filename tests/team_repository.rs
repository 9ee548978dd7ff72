mod common;
use common::{TestContext, test_data, client::TestClient};
use member_registry::types::error::AppError;
use member_registry::types::team::TeamDraft;

#[tokio::test]
async fn test_team_save_and_find() {
    let ctx = TestContext::new().await;

    let team = ctx.db.save_team(test_data::team("teamA")).await.unwrap();

    assert_eq!(ctx.db.find_team_by_id(team.id).await.unwrap(), Some(team.clone()));
    assert_eq!(ctx.db.get_team(team.id).await.unwrap().name, "teamA");
    assert_eq!(ctx.db.count_teams().await.unwrap(), 1);
    assert_eq!(ctx.db.find_all_teams().await.unwrap(), vec![team]);
}

#[tokio::test]
async fn test_team_rename_through_save() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let team = client.create_team("teamA").await;
    let mut draft = TeamDraft::from(team.clone());
    draft.name = "teamZ".to_string();
    let renamed = ctx.db.save_team(draft).await.unwrap();

    assert_eq!(renamed.id, team.id);
    assert_eq!(ctx.db.get_team(team.id).await.unwrap().name, "teamZ");
    assert_eq!(ctx.db.count_teams().await.unwrap(), 1);
}

#[tokio::test]
async fn test_team_explicit_id_then_generated() {
    let ctx = TestContext::new().await;

    let explicit = ctx.db.save_team(TeamDraft { id: Some(10), ..test_data::team("teamA") }).await.unwrap();
    assert_eq!(explicit.id, 10);

    let generated = ctx.db.save_team(test_data::team("teamB")).await.unwrap();
    assert!(generated.id > 10);
    assert_eq!(ctx.db.count_teams().await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_team() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.db.find_team_by_id(1).await.unwrap(), None);
    assert!(matches!(ctx.db.get_team(1).await, Err(AppError::NotFound)));
    assert!(matches!(ctx.db.delete_team(1).await, Err(AppError::NotFound)));
    assert!(ctx.db.find_team_with_members(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_team_members_view() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let team_a = client.create_team("teamA").await;
    let team_b = client.create_team("teamB").await;
    let m1 = client.create_member_in_team("member1", 10, team_a.id).await;
    let m2 = client.create_member_in_team("member2", 20, team_a.id).await;
    client.create_member_in_team("member3", 30, team_b.id).await;

    assert_eq!(ctx.db.list_team_members(team_a.id).await.unwrap(), vec![m1.clone(), m2.clone()]);

    let (team, members) = ctx.db.find_team_with_members(team_a.id).await.unwrap().expect("team should exist");
    assert_eq!(team.name, "teamA");
    assert_eq!(members.len(), 2);
    assert!(members.contains(&m1) && members.contains(&m2));
}

#[tokio::test]
async fn test_move_member_between_teams() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let team_a = client.create_team("teamA").await;
    let team_b = client.create_team("teamB").await;
    let member = client.create_member_in_team("member1", 10, team_a.id).await;

    let mut draft = member_registry::types::member::MemberDraft::from(member);
    draft.team_id = Some(team_b.id);
    let moved = ctx.db.save_member(draft).await.unwrap();

    assert_eq!(moved.team_id, Some(team_b.id));
    assert!(ctx.db.list_team_members(team_a.id).await.unwrap().is_empty());
    assert_eq!(ctx.db.list_team_members(team_b.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_team_keeps_members() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let team = client.create_team("teamA").await;
    let member = client.create_member_in_team("member1", 10, team.id).await;

    ctx.db.delete_team(team.id).await.unwrap();

    assert_eq!(ctx.db.count_teams().await.unwrap(), 0);
    let survivor = ctx.db.get_member(member.id).await.unwrap();
    assert_eq!(survivor.team_id, None);
    assert_eq!(survivor.user_name, "member1");
}
