use json as serde_json;
use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
  #[sea_orm(string_value = "Men")]
  Men,
  #[sea_orm(string_value = "Women")]
  Women,
  #[sea_orm(string_value = "Kids")]
  Kids,
  #[sea_orm(string_value = "Sportswear")]
  Sportswear,
  #[sea_orm(string_value = "Shoes")]
  Shoes,
  #[sea_orm(string_value = "Accessories")]
  Accessories,
  #[sea_orm(string_value = "Home")]
  Home,
}

impl Category {
  pub const ALL: [Category; 7] = [
    Category::Men,
    Category::Women,
    Category::Kids,
    Category::Sportswear,
    Category::Shoes,
    Category::Accessories,
    Category::Home,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Men => "Men",
      Category::Women => "Women",
      Category::Kids => "Kids",
      Category::Sportswear => "Sportswear",
      Category::Shoes => "Shoes",
      Category::Accessories => "Accessories",
      Category::Home => "Home",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(FromJsonQueryResult)]
pub struct Tags(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deals")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  pub title: String,
  pub brand: String,
  pub category: Category,
  pub url: String,
  pub image: Option<String>,
  pub price: f64,
  pub original_price: Option<f64>,
  pub discount_percent: Option<f64>,
  #[sea_orm(column_type = "Json", nullable)]
  pub tags: Option<Tags>,
  pub store: Option<String>,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
  pub fn tags(&self) -> &[String] {
    self.tags.as_ref().map(|t| t.0.as_slice()).unwrap_or_default()
  }
}
