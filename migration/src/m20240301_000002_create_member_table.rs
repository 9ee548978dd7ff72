use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
    UserName,
    Age,
    TeamId,
    CreatedDate,
    LastModifiedDate,
}

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // FK is declared inline, sqlite cannot ALTER TABLE ADD CONSTRAINT
        m.create_table(
            Table::create()
                .table(Member::Table)
                .if_not_exists()
                .col(ColumnDef::new(Member::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Member::UserName).string().not_null())
                .col(ColumnDef::new(Member::Age).integer().not_null().default(0))
                .col(ColumnDef::new(Member::TeamId).integer().null())
                .col(ColumnDef::new(Member::CreatedDate).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Member::LastModifiedDate).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_member_team")
                        .from(Member::Table, Member::TeamId)
                        .to(Team::Table, Team::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_member_user_name")
                .table(Member::Table)
                .col(Member::UserName)
                .to_owned(),
        ).await?;

        // paging filters and bulk updates both go through age
        m.create_index(
            Index::create()
                .name("idx_member_age")
                .table(Member::Table)
                .col(Member::Age)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_member_team_id")
                .table(Member::Table)
                .col(Member::TeamId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes implicitly with table
        m.drop_table(Table::drop().table(Member::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
