use serde::Serialize;

use crate::{
  entity::{Category, deal},
  prelude::*,
  schema::NewDeal,
  store::DealStore,
  sv::query::{DealQuery, rank},
  utils::round2,
};

/// Percentage off `original_price`, floored at zero and rounded to cents.
pub fn discount_percent(price: f64, original_price: f64) -> f64 {
  round2(((1.0 - price / original_price) * 100.0).max(0.0))
}

/// Deal as returned to clients, identified by a plain string id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealItem {
  pub id: String,
  pub title: String,
  pub brand: String,
  pub category: Category,
  pub url: String,
  pub image: Option<String>,
  pub price: f64,
  pub original_price: Option<f64>,
  pub discount_percent: Option<f64>,
  pub tags: Option<Vec<String>>,
  pub store: Option<String>,
  pub created_at: DateTime,
}

impl From<deal::Model> for DealItem {
  fn from(model: deal::Model) -> Self {
    Self {
      id: model.id.to_string(),
      title: model.title,
      brand: model.brand,
      category: model.category,
      url: model.url,
      image: model.image,
      price: model.price,
      original_price: model.original_price,
      discount_percent: model.discount_percent,
      tags: model.tags.map(|t| t.0),
      store: model.store,
      created_at: model.created_at,
    }
  }
}

pub const MAX_BRANDS: usize = 200;

pub struct Deals<'a> {
  store: Option<&'a dyn DealStore>,
}

impl<'a> Deals<'a> {
  /// `store` is `None` when the service runs without a database.
  pub fn new(store: Option<&'a dyn DealStore>) -> Self {
    Self { store }
  }

  pub async fn create(&self, mut deal: NewDeal) -> Result<String> {
    let store = self.store.ok_or(Error::Unavailable)?;

    if let Some(original) = deal.original_price
      && original > 0.0
    {
      deal.discount_percent = Some(discount_percent(deal.price, original));
    }

    let id = store.insert_one(deal).await?;
    info!("Created deal {id}");
    Ok(id.to_string())
  }

  pub async fn search(&self, query: &DealQuery) -> Result<Vec<DealItem>> {
    let Some(store) = self.store else {
      return Ok(Vec::new());
    };

    let mut deals = store.find(&query.filter(), query.limit).await?;
    debug!("Search {:?} fetched {} deals", query, deals.len());

    rank(&mut deals);
    Ok(deals.into_iter().map(DealItem::from).collect())
  }

  /// Distinct non-empty brands in ascending order, at most [`MAX_BRANDS`].
  pub async fn brands(&self) -> Result<Vec<String>> {
    let Some(store) = self.store else {
      return Ok(Vec::new());
    };

    let mut brands = store.distinct_brands().await?;
    brands.retain(|b| !b.is_empty());
    brands.sort();
    brands.dedup();
    brands.truncate(MAX_BRANDS);
    Ok(brands)
  }
}
