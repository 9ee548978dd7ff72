use crate::db::repository::{audit_now, sync_id_sequence, Repository};
use crate::types::{
    error::AppError,
    member::{MemberDraft, MemberDto, MemberSearch, NestedClosedProjection, TeamNameOnly, UserNameOnly},
    page::{MemberSortField, Page, PageRequest, SortOrder},
};
use entity::member::{self, ActiveModel as MemberActive, Entity as Member, Model as MemberModel};
use entity::team::{self, Entity as Team, Model as TeamModel};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
    TransactionTrait,
};
use tracing::{debug, info};

impl<C: ConnectionTrait + TransactionTrait> Repository<C> {
    /// Insert when `draft.id` is unset, otherwise upsert on that id.
    /// `created_date` is only ever written by the insert branch.
    pub async fn save_member(&self, draft: MemberDraft) -> Result<MemberModel, AppError> {
        let txn = self.conn.begin().await?;

        if let Some(team_id) = draft.team_id {
            if Team::find_by_id(team_id).one(&txn).await?.is_none() {
                txn.rollback().await?;
                return Err(AppError::ConstraintViolation(format!("team {team_id} does not exist")));
            }
        }

        let existing = match draft.id {
            Some(id) => Member::find_by_id(id).one(&txn).await?,
            None => None,
        };

        let now = audit_now();
        let saved = match existing {
            Some(current) => {
                let mut am: MemberActive = current.into();
                am.user_name = Set(draft.user_name);
                am.age = Set(draft.age);
                am.team_id = Set(draft.team_id);
                am.last_modified_date = Set(now);
                am.update(&txn).await?
            }
            None => {
                let inserted = MemberActive {
                    id: match draft.id {
                        Some(id) => Set(id),
                        None => NotSet,
                    },
                    user_name: Set(draft.user_name),
                    age: Set(draft.age),
                    team_id: Set(draft.team_id),
                    created_date: Set(now),
                    last_modified_date: Set(now),
                }
                .insert(&txn)
                .await?;
                if draft.id.is_some() {
                    sync_id_sequence(&txn, "member").await?;
                }
                inserted
            }
        };

        txn.commit().await?;
        debug!("Saved member {}", saved.id);
        Ok(saved)
    }

    pub async fn find_member_by_id(&self, id: i32) -> Result<Option<MemberModel>, AppError> {
        Ok(Member::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_member(&self, id: i32) -> Result<MemberModel, AppError> {
        Ok(Member::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Member not found".into()))?)
    }

    /// Fresh copy of a member previously loaded, e.g. after [`Self::bulk_age_plus`].
    pub async fn reload_member(&self, member: &MemberModel) -> Result<Option<MemberModel>, AppError> {
        self.find_member_by_id(member.id).await
    }

    pub async fn find_all_members(&self) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find().order_by_asc(member::Column::Id).all(&self.conn).await?)
    }

    /// Members with their team, loaded by one left join instead of a lookup per row.
    pub async fn find_all_members_with_team(&self) -> Result<Vec<(MemberModel, Option<TeamModel>)>, AppError> {
        Ok(Member::find()
            .find_also_related(Team)
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_members_with_team_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Vec<(MemberModel, Option<TeamModel>)>, AppError> {
        Ok(Member::find()
            .find_also_related(Team)
            .filter(member::Column::UserName.eq(user_name))
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_top3_members(&self) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find()
            .order_by_asc(member::Column::Id)
            .limit(3)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_members_by_user_name_and_age_greater_than(
        &self,
        user_name: &str,
        age: i32,
    ) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find()
            .filter(member::Column::UserName.eq(user_name))
            .filter(member::Column::Age.gt(age))
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_members_by_user_name_and_age(
        &self,
        user_name: &str,
        age: i32,
    ) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find()
            .filter(member::Column::UserName.eq(user_name))
            .filter(member::Column::Age.eq(age))
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_members_by_user_name(&self, user_name: &str) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find()
            .filter(member::Column::UserName.eq(user_name))
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// Single-result lookup: `None` for no match, `NonUniqueResult` for more than one.
    pub async fn find_member_by_user_name(&self, user_name: &str) -> Result<Option<MemberModel>, AppError> {
        let rows = Member::find()
            .filter(member::Column::UserName.eq(user_name))
            .limit(2)
            .all(&self.conn)
            .await?;
        single_result(rows)
    }

    pub async fn find_members_by_user_names(&self, user_names: &[String]) -> Result<Vec<MemberModel>, AppError> {
        if user_names.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Member::find()
            .filter(member::Column::UserName.is_in(user_names.iter().cloned()))
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn find_user_names(&self) -> Result<Vec<String>, AppError> {
        Ok(Member::find()
            .select_only()
            .column(member::Column::UserName)
            .order_by_asc(member::Column::Id)
            .into_tuple::<String>()
            .all(&self.conn)
            .await?)
    }

    /// Rows come back write-locked until the surrounding transaction ends.
    /// Backends without row locks (sqlite) drop the clause.
    pub async fn find_members_by_user_name_for_update(&self, user_name: &str) -> Result<Vec<MemberModel>, AppError> {
        Ok(Member::find()
            .filter(member::Column::UserName.eq(user_name))
            .order_by_asc(member::Column::Id)
            .lock_exclusive()
            .all(&self.conn)
            .await?)
    }

    pub async fn search_members(&self, search: &MemberSearch) -> Result<Vec<MemberModel>, AppError> {
        let mut cond = Condition::all();
        if let Some(user_name) = &search.user_name {
            cond = cond.add(member::Column::UserName.eq(user_name.as_str()));
        }
        if let Some(age) = search.age {
            cond = cond.add(member::Column::Age.eq(age));
        }
        if let Some(team_name) = &search.team_name {
            cond = cond.add(team::Column::Name.eq(team_name.as_str()));
        }

        Ok(Member::find()
            .apply_if(search.team_name.as_ref(), |q, _| q.inner_join(Team))
            .filter(cond)
            .order_by_asc(member::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn count_members(&self) -> Result<u64, AppError> {
        Ok(Member::find().count(&self.conn).await?)
    }

    pub async fn delete_member(&self, member: &MemberModel) -> Result<(), AppError> {
        let res = Member::delete_by_id(member.id).exec(&self.conn).await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Member not found".into()).into());
        }
        Ok(())
    }

    /// `age = age + 1` for every member with `age >= threshold`, in one statement.
    ///
    /// Members loaded before this call keep their old age; reload them.
    pub async fn bulk_age_plus(&self, threshold: i32) -> Result<u64, AppError> {
        let res = Member::update_many()
            .col_expr(member::Column::Age, Expr::col(member::Column::Age).add(1))
            .filter(member::Column::Age.gte(threshold))
            .exec(&self.conn)
            .await?;
        info!("Bulk age update from {} touched {} members", threshold, res.rows_affected);
        Ok(res.rows_affected)
    }

    /// Page of members, optionally restricted to one age. Count and slice are
    /// read in the same transaction.
    pub async fn find_members_page(
        &self,
        age: Option<i32>,
        request: &PageRequest,
    ) -> Result<Page<MemberModel>, AppError> {
        request.validate()?;
        let finder = Member::find().apply_if(age, |q, age| q.filter(member::Column::Age.eq(age)));

        let txn = self.conn.begin().await?;
        let total = finder.clone().count(&txn).await?;
        let content = sorted(finder, &request.sort)
            .offset(request.offset())
            .limit(request.size)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(Page::new(content, request, total))
    }

    pub async fn find_member_dto_page(&self, request: &PageRequest) -> Result<Page<MemberDto>, AppError> {
        request.validate()?;

        let txn = self.conn.begin().await?;
        let total = Member::find().count(&txn).await?;
        let rows = sorted(Member::find().find_also_related(Team), &request.sort)
            .offset(request.offset())
            .limit(request.size)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(Page::new(rows, request, total).map(|(m, t)| MemberDto::from_parts(&m, t.as_ref())))
    }

    pub async fn find_member_dtos(&self) -> Result<Vec<MemberDto>, AppError> {
        Ok(Member::find()
            .select_only()
            .column(member::Column::Id)
            .column(member::Column::UserName)
            .column_as(team::Column::Name, "team_name")
            .left_join(Team)
            .order_by_asc(member::Column::Id)
            .into_model::<MemberDto>()
            .all(&self.conn)
            .await?)
    }

    pub async fn find_user_name_projections(&self, user_name: &str) -> Result<Vec<UserNameOnly>, AppError> {
        Ok(Member::find()
            .select_only()
            .column(member::Column::UserName)
            .filter(member::Column::UserName.eq(user_name))
            .order_by_asc(member::Column::Id)
            .into_model::<UserNameOnly>()
            .all(&self.conn)
            .await?)
    }

    pub async fn find_nested_projections(&self, user_name: &str) -> Result<Vec<NestedClosedProjection>, AppError> {
        let rows = self.find_members_with_team_by_user_name(user_name).await?;
        Ok(rows
            .into_iter()
            .map(|(m, t)| NestedClosedProjection {
                user_name: m.user_name,
                team: t.map(|t| TeamNameOnly { name: t.name }),
            })
            .collect())
    }
}

// id breaks ties so page boundaries stay stable between requests
fn sorted<Q: QueryOrder>(mut query: Q, sort: &[SortOrder]) -> Q {
    for order in sort {
        query = query.order_by(order.field.column(), order.direction.order());
    }
    if !sort.iter().any(|order| order.field == MemberSortField::Id) {
        query = query.order_by_asc(member::Column::Id);
    }
    query
}

fn single_result<T>(mut rows: Vec<T>) -> Result<Option<T>, AppError> {
    match rows.len() {
        0 | 1 => Ok(rows.pop()),
        n => Err(AppError::NonUniqueResult(n)),
    }
}
