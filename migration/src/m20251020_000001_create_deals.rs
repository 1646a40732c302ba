use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Deals::Table)
          .if_not_exists()
          .col(ColumnDef::new(Deals::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(Deals::Title).string().not_null())
          .col(ColumnDef::new(Deals::Brand).string().not_null())
          .col(ColumnDef::new(Deals::Category).string().not_null())
          .col(ColumnDef::new(Deals::Url).string().not_null())
          .col(ColumnDef::new(Deals::Image).string().null())
          .col(ColumnDef::new(Deals::Price).double().not_null())
          .col(ColumnDef::new(Deals::OriginalPrice).double().null())
          .col(ColumnDef::new(Deals::DiscountPercent).double().null())
          .col(ColumnDef::new(Deals::Tags).json().null())
          .col(ColumnDef::new(Deals::Store).string().null())
          .col(ColumnDef::new(Deals::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_deals_brand")
          .table(Deals::Table)
          .col(Deals::Brand)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Deals::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Deals {
  Table,
  Id,
  Title,
  Brand,
  Category,
  Url,
  Image,
  Price,
  OriginalPrice,
  DiscountPercent,
  Tags,
  Store,
  CreatedAt,
}
