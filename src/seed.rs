use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::info;

use crate::db::repository::Repository;
use crate::types::{error::AppError, member::MemberDraft};

pub const DEMO_MEMBER_COUNT: i32 = 100;

/// Demo rows for poking at the list endpoint by hand: `user0..user99`,
/// aged `0..99`, written in one transaction.
pub async fn seed_demo_members<C>(repo: &Repository<C>) -> Result<u64, AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let tx = repo.begin().await?;
    for i in 0..DEMO_MEMBER_COUNT {
        tx.save_member(MemberDraft::new(format!("user{i}"), i)).await?;
    }
    tx.commit().await?;

    info!("Seeded {} demo members", DEMO_MEMBER_COUNT);
    Ok(DEMO_MEMBER_COUNT as u64)
}
