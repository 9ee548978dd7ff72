use crate::db::repository::{sync_id_sequence, Repository};
use crate::types::{error::AppError, team::TeamDraft};
use entity::member::{self, Entity as Member, Model as MemberModel};
use entity::team::{self, ActiveModel as TeamActive, Entity as Team, Model as TeamModel};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

impl<C: ConnectionTrait + TransactionTrait> Repository<C> {
    /// Same policy as members: insert without id, upsert with one.
    pub async fn save_team(&self, draft: TeamDraft) -> Result<TeamModel, AppError> {
        let txn = self.conn.begin().await?;
        let existing = match draft.id {
            Some(id) => Team::find_by_id(id).one(&txn).await?,
            None => None,
        };

        let saved = match existing {
            Some(current) => {
                let mut am: TeamActive = current.into();
                am.name = Set(draft.name);
                am.update(&txn).await?
            }
            None => {
                let inserted = TeamActive {
                    id: match draft.id {
                        Some(id) => Set(id),
                        None => NotSet,
                    },
                    name: Set(draft.name),
                }
                .insert(&txn)
                .await?;
                if draft.id.is_some() {
                    sync_id_sequence(&txn, "team").await?;
                }
                inserted
            }
        };

        txn.commit().await?;
        Ok(saved)
    }

    pub async fn find_team_by_id(&self, id: i32) -> Result<Option<TeamModel>, AppError> {
        Ok(Team::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_team(&self, id: i32) -> Result<TeamModel, AppError> {
        Ok(Team::find_by_id(id).one(&self.conn).await?.ok_or(DbErr::RecordNotFound("Team not found".to_string()))?)
    }

    pub async fn find_all_teams(&self) -> Result<Vec<TeamModel>, AppError> {
        Ok(Team::find().order_by_asc(team::Column::Id).all(&self.conn).await?)
    }

    pub async fn count_teams(&self) -> Result<u64, AppError> {
        Ok(Team::find().count(&self.conn).await?)
    }

    /// Read-only view of the members pointing at a team.
    pub async fn list_team_members(&self, team_id: i32) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find()
            .filter(member::Column::TeamId.eq(team_id))
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_team_with_members(&self, team_id: i32) -> Result<Option<(TeamModel, Vec<MemberModel>)>, AppError> {
        let mut rows = Team::find_by_id(team_id)
            .find_with_related(Member)
            .all(&self.conn)
            .await?;
        Ok(rows.pop())
    }

    /// Members of the team stay, with `team_id` cleared.
    pub async fn delete_team(&self, team_id: i32) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;

        let detached = Member::update_many()
            .col_expr(member::Column::TeamId, Expr::value(Option::<i32>::None))
            .filter(member::Column::TeamId.eq(team_id))
            .exec(&txn)
            .await?;

        let res = Team::delete_by_id(team_id).exec(&txn).await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DbErr::RecordNotFound("Team not found".into()).into());
        }

        txn.commit().await?;
        info!("Deleted team {} and detached {} members", team_id, detached.rows_affected);
        Ok(())
    }
}
