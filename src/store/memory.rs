use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DealStore, Field, Filter, new_model};
use crate::{entity::deal, prelude::*, schema::NewDeal};

/// Deals held in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
  deals: RwLock<Vec<deal::Model>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn text(deal: &deal::Model, field: Field) -> Option<&str> {
  match field {
    Field::Title => Some(deal.title.as_str()),
    Field::Brand => Some(deal.brand.as_str()),
    Field::Category => Some(deal.category.as_str()),
    Field::Tags | Field::DiscountPercent => None,
  }
}

fn number(deal: &deal::Model, field: Field) -> Option<f64> {
  match field {
    Field::DiscountPercent => deal.discount_percent,
    _ => None,
  }
}

fn contains(haystack: &str, term: &str) -> bool {
  haystack.to_lowercase().contains(&term.to_lowercase())
}

impl Filter {
  pub fn matches(&self, deal: &deal::Model) -> bool {
    match self {
      Filter::All(items) => items.iter().all(|f| f.matches(deal)),
      Filter::Any(items) => items.iter().any(|f| f.matches(deal)),
      Filter::Contains { field, term } => {
        text(deal, *field).is_some_and(|v| contains(v, term))
      }
      Filter::AnyElementContains { field: Field::Tags, term } => {
        deal.tags().iter().any(|tag| contains(tag, term))
      }
      Filter::AnyElementContains { .. } => false,
      Filter::EqualsIgnoreCase { field, value } => text(deal, *field)
        .is_some_and(|v| v.to_lowercase() == value.to_lowercase()),
      Filter::AtLeast { field, value } => {
        number(deal, *field).is_some_and(|v| v >= *value)
      }
    }
  }
}

#[async_trait]
impl DealStore for MemoryStore {
  async fn insert_one(&self, deal: NewDeal) -> Result<Uuid> {
    let model = new_model(deal);
    let id = model.id;
    self.deals.write().await.push(model);
    Ok(id)
  }

  async fn find(&self, filter: &Filter, limit: u64) -> Result<Vec<deal::Model>> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let deals = self.deals.read().await;
    Ok(deals.iter().filter(|d| filter.matches(d)).take(limit).cloned().collect())
  }

  async fn distinct_brands(&self) -> Result<Vec<String>> {
    let deals = self.deals.read().await;
    let brands: HashSet<&str> = deals.iter().map(|d| d.brand.as_str()).collect();
    Ok(brands.into_iter().map(String::from).collect())
  }

  async fn collections(&self) -> Result<Vec<String>> {
    Ok(vec!["deals".into()])
  }
}
