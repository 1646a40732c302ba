//! Storage collaborator for deals.

mod memory;
mod sea;

use async_trait::async_trait;
pub use memory::MemoryStore;
pub use sea::SeaStore;
use uuid::Uuid;

use crate::{entity::deal, prelude::*, schema::NewDeal};

/// Deal fields a [`Filter`] can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Title,
  Brand,
  Category,
  Tags,
  DiscountPercent,
}

/// Store-independent filter expression.
///
/// Text comparisons are case-insensitive and treat their argument literally.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
  /// Every child matches. Empty matches everything.
  All(Vec<Filter>),
  /// At least one child matches.
  Any(Vec<Filter>),
  Contains { field: Field, term: String },
  /// Some element of a text sequence contains `term`.
  AnyElementContains { field: Field, term: String },
  EqualsIgnoreCase { field: Field, value: String },
  /// Numeric `>=`; records without a value never match.
  AtLeast { field: Field, value: f64 },
}

#[async_trait]
pub trait DealStore: Send + Sync {
  /// Persist a deal and return its generated identifier.
  async fn insert_one(&self, deal: NewDeal) -> Result<Uuid>;

  /// Up to `limit` deals matching `filter`, in retrieval order.
  async fn find(&self, filter: &Filter, limit: u64) -> Result<Vec<deal::Model>>;

  /// Every distinct brand value, in no particular order.
  async fn distinct_brands(&self) -> Result<Vec<String>>;

  /// Names of the collections (tables) backing the store.
  async fn collections(&self) -> Result<Vec<String>>;
}

fn new_model(deal: NewDeal) -> deal::Model {
  deal::Model {
    id: Uuid::new_v4(),
    title: deal.title,
    brand: deal.brand,
    category: deal.category,
    url: deal.url,
    image: deal.image,
    price: deal.price,
    original_price: deal.original_price,
    discount_percent: deal.discount_percent,
    tags: deal.tags.map(deal::Tags),
    store: deal.store,
    created_at: Utc::now().naive_utc(),
  }
}
