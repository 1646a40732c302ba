use async_trait::async_trait;
use sea_orm::{
  Condition, DbBackend, QuerySelect, Statement,
  sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};
use uuid::Uuid;

use super::{DealStore, Field, Filter, new_model};
use crate::{entity::deal, prelude::*, schema::NewDeal};

/// Escape character for LIKE patterns.
const ESCAPE: char = '!';

/// Matches when any element of the JSON `tags` array is LIKE the bound pattern.
const TAG_LIKE_SQL: &str = "EXISTS (SELECT 1 FROM json_each(\"deals\".\"tags\") \
   WHERE LOWER(json_each.value) LIKE ? ESCAPE '!')";

/// Deals persisted through sea-orm (SQLite).
#[derive(Debug, Clone)]
pub struct SeaStore {
  db: DatabaseConnection,
}

impl SeaStore {
  pub fn new(db: DatabaseConnection) -> Self {
    Self { db }
  }
}

fn column(field: Field) -> deal::Column {
  match field {
    Field::Title => deal::Column::Title,
    Field::Brand => deal::Column::Brand,
    Field::Category => deal::Column::Category,
    Field::Tags => deal::Column::Tags,
    Field::DiscountPercent => deal::Column::DiscountPercent,
  }
}

/// `%term%`, lower-cased, with LIKE wildcards escaped.
fn like_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for ch in term.to_lowercase().chars() {
    if matches!(ch, '%' | '_') || ch == ESCAPE {
      pattern.push(ESCAPE);
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

fn lower(field: Field) -> Expr {
  Expr::expr(Func::lower(Expr::col(column(field))))
}

fn leaf(expr: SimpleExpr) -> Condition {
  Condition::all().add(expr)
}

pub(crate) fn condition(filter: &Filter) -> Condition {
  match filter {
    Filter::All(items) => {
      items.iter().fold(Condition::all(), |acc, f| acc.add(condition(f)))
    }
    Filter::Any(items) => {
      items.iter().fold(Condition::any(), |acc, f| acc.add(condition(f)))
    }
    Filter::Contains { field, term } => leaf(
      lower(*field).like(LikeExpr::new(like_pattern(term)).escape(ESCAPE)),
    ),
    Filter::AnyElementContains { term, .. } => {
      leaf(Expr::cust_with_values(TAG_LIKE_SQL, [like_pattern(term)]))
    }
    Filter::EqualsIgnoreCase { field, value } => {
      leaf(lower(*field).eq(value.to_lowercase()))
    }
    Filter::AtLeast { field, value } => leaf(column(*field).gte(*value)),
  }
}

#[async_trait]
impl DealStore for SeaStore {
  async fn insert_one(&self, deal: NewDeal) -> Result<Uuid> {
    let model = new_model(deal);
    let inserted = deal::ActiveModel {
      id: Set(model.id),
      title: Set(model.title),
      brand: Set(model.brand),
      category: Set(model.category),
      url: Set(model.url),
      image: Set(model.image),
      price: Set(model.price),
      original_price: Set(model.original_price),
      discount_percent: Set(model.discount_percent),
      tags: Set(model.tags),
      store: Set(model.store),
      created_at: Set(model.created_at),
    }
    .insert(&self.db)
    .await?;
    Ok(inserted.id)
  }

  async fn find(&self, filter: &Filter, limit: u64) -> Result<Vec<deal::Model>> {
    let deals = deal::Entity::find()
      .filter(condition(filter))
      .limit(limit)
      .all(&self.db)
      .await?;
    Ok(deals)
  }

  async fn distinct_brands(&self) -> Result<Vec<String>> {
    let brands = deal::Entity::find()
      .select_only()
      .column(deal::Column::Brand)
      .distinct()
      .into_tuple::<String>()
      .all(&self.db)
      .await?;
    Ok(brands)
  }

  async fn collections(&self) -> Result<Vec<String>> {
    let stmt = Statement::from_string(
      DbBackend::Sqlite,
      "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    );
    let rows = self.db.query_all(stmt).await?;
    let names = rows.iter().filter_map(|row| row.try_get::<String>("", "name").ok());
    Ok(names.collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{store::fixtures::deal, sv::test_utils::test_db};

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("Nike"), "%nike%");
    assert_eq!(like_pattern("50%_off!"), "%50!%!_off!!%");
  }

  #[tokio::test]
  async fn insert_and_find_round_trip() {
    let store = SeaStore::new(test_db::setup().await);
    let mut new = deal("Sneaker Sale", "Nike", 60.0);
    new.tags = Some(vec!["Running".into()]);
    let id = store.insert_one(new).await.unwrap();

    let found = store.find(&Filter::All(vec![]), 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    assert_eq!(found[0].tags(), ["Running".to_string()]);
  }

  #[tokio::test]
  async fn text_filters_are_case_insensitive() {
    let store = SeaStore::new(test_db::setup().await);
    store.insert_one(deal("Air Max", "Nike", 100.0)).await.unwrap();
    store.insert_one(deal("Court", "Nike Store", 80.0)).await.unwrap();

    let exact =
      Filter::EqualsIgnoreCase { field: Field::Brand, value: "nike".into() };
    let found = store.find(&exact, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].brand, "Nike");

    let partial = Filter::Contains { field: Field::Brand, term: "NIKE".into() };
    assert_eq!(store.find(&partial, 10).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn wildcards_in_terms_are_literal() {
    let store = SeaStore::new(test_db::setup().await);
    store.insert_one(deal("50% off", "Gap", 10.0)).await.unwrap();
    store.insert_one(deal("500 off", "Gap", 10.0)).await.unwrap();

    let filter = Filter::Contains { field: Field::Title, term: "50%".into() };
    let found = store.find(&filter, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "50% off");
  }

  #[tokio::test]
  async fn tag_elements_are_searched() {
    let store = SeaStore::new(test_db::setup().await);
    let mut tagged = deal("Plain", "Puma", 5.0);
    tagged.tags = Some(vec!["summer".into(), "Clearance".into()]);
    store.insert_one(tagged).await.unwrap();
    store.insert_one(deal("Untagged", "Puma", 5.0)).await.unwrap();

    let filter =
      Filter::AnyElementContains { field: Field::Tags, term: "CLEAR".into() };
    let found = store.find(&filter, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Plain");
  }

  #[tokio::test]
  async fn at_least_excludes_null_discounts() {
    let store = SeaStore::new(test_db::setup().await);
    let mut discounted = deal("Half", "Vans", 50.0);
    discounted.discount_percent = Some(50.0);
    store.insert_one(discounted).await.unwrap();
    store.insert_one(deal("Full", "Vans", 100.0)).await.unwrap();

    let filter = Filter::AtLeast { field: Field::DiscountPercent, value: 50.0 };
    let found = store.find(&filter, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Half");
  }

  #[tokio::test]
  async fn distinct_brands_and_collections() {
    let store = SeaStore::new(test_db::setup().await);
    store.insert_one(deal("A", "Nike", 1.0)).await.unwrap();
    store.insert_one(deal("B", "Nike", 1.0)).await.unwrap();
    store.insert_one(deal("C", "Asics", 1.0)).await.unwrap();

    let mut brands = store.distinct_brands().await.unwrap();
    brands.sort();
    assert_eq!(brands, vec!["Asics", "Nike"]);
    assert!(store.collections().await.unwrap().contains(&"deals".to_string()));
  }
}
