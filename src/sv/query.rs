//! Deal search parameters and their translation into a store [`Filter`].

use std::cmp::Ordering;

use crate::{
  entity::deal,
  schema::ValidationErrors,
  store::{Field, Filter},
};

pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 200;

/// Validated search over deals.
#[derive(Debug, Clone, PartialEq)]
pub struct DealQuery {
  /// Free text matched against title, brand and tags.
  pub text: Option<String>,
  pub brand: Option<String>,
  pub category: Option<String>,
  pub min_discount: Option<f64>,
  pub limit: u64,
}

impl Default for DealQuery {
  fn default() -> Self {
    Self {
      text: None,
      brand: None,
      category: None,
      min_discount: None,
      limit: DEFAULT_LIMIT,
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

impl DealQuery {
  /// Checks bounds and drops empty text parameters.
  pub fn new(
    text: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    min_discount: Option<f64>,
    limit: Option<i64>,
  ) -> Result<Self, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Some(min) = min_discount {
      errors.check(
        (0.0..=100.0).contains(&min),
        "min_discount",
        "must be between 0 and 100",
      );
    }

    let limit = match limit {
      None => DEFAULT_LIMIT,
      Some(n) => match u64::try_from(n) {
        Ok(n) if (1..=MAX_LIMIT).contains(&n) => n,
        _ => {
          errors.push("limit", format!("must be between 1 and {MAX_LIMIT}"));
          DEFAULT_LIMIT
        }
      },
    };

    errors.finish(Self {
      text: non_empty(text),
      brand: non_empty(brand),
      category: non_empty(category),
      min_discount,
      limit,
    })
  }

  /// Store filter for this query: every given parameter must hold, and the
  /// free text may hit any of title, brand or tags.
  pub fn filter(&self) -> Filter {
    let mut all = Vec::new();

    if let Some(text) = &self.text {
      all.push(Filter::Any(vec![
        Filter::Contains { field: Field::Title, term: text.clone() },
        Filter::Contains { field: Field::Brand, term: text.clone() },
        Filter::AnyElementContains { field: Field::Tags, term: text.clone() },
      ]));
    }
    if let Some(brand) = &self.brand {
      all.push(Filter::EqualsIgnoreCase {
        field: Field::Brand,
        value: brand.clone(),
      });
    }
    if let Some(category) = &self.category {
      all.push(Filter::EqualsIgnoreCase {
        field: Field::Category,
        value: category.clone(),
      });
    }
    if let Some(min) = self.min_discount {
      all.push(Filter::AtLeast { field: Field::DiscountPercent, value: min });
    }

    Filter::All(all)
  }
}

/// Best discount first, then cheapest. Missing values count as zero and the
/// sort is stable, so remaining ties keep retrieval order.
pub fn rank(deals: &mut [deal::Model]) {
  deals.sort_by(|a, b| {
    let (da, db) =
      (a.discount_percent.unwrap_or(0.0), b.discount_percent.unwrap_or(0.0));
    db.partial_cmp(&da)
      .unwrap_or(Ordering::Equal)
      .then_with(|| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
  });
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{entity::Category, prelude::*};

  fn model(title: &str, price: f64, discount: Option<f64>) -> deal::Model {
    deal::Model {
      id: uuid::Uuid::new_v4(),
      title: title.into(),
      brand: "Nike".into(),
      category: Category::Shoes,
      url: "http://x/1".into(),
      image: None,
      price,
      original_price: None,
      discount_percent: discount,
      tags: None,
      store: None,
      created_at: Utc::now().naive_utc(),
    }
  }

  #[test]
  fn empty_query_matches_everything() {
    assert_eq!(DealQuery::default().filter(), Filter::All(vec![]));
  }

  #[test]
  fn builds_anded_filters_with_ored_text() {
    let query = DealQuery {
      text: Some("run".into()),
      brand: Some("nike".into()),
      category: Some("shoes".into()),
      min_discount: Some(30.0),
      limit: 10,
    };

    let Filter::All(parts) = query.filter() else {
      panic!("expected a conjunction");
    };
    assert_eq!(parts.len(), 4);
    assert!(matches!(&parts[0], Filter::Any(any) if any.len() == 3));
    assert_eq!(
      parts[1],
      Filter::EqualsIgnoreCase { field: Field::Brand, value: "nike".into() }
    );
    assert_eq!(
      parts[2],
      Filter::EqualsIgnoreCase { field: Field::Category, value: "shoes".into() }
    );
    assert_eq!(
      parts[3],
      Filter::AtLeast { field: Field::DiscountPercent, value: 30.0 }
    );
  }

  #[test]
  fn empty_strings_are_ignored() {
    let query =
      DealQuery::new(Some(String::new()), Some(String::new()), None, None, None)
        .unwrap();
    assert_eq!(query, DealQuery::default());
  }

  #[test]
  fn bounds_are_checked() {
    let errors =
      DealQuery::new(None, None, None, Some(101.0), Some(0)).unwrap_err();
    assert_eq!(
      errors.fields().collect::<Vec<_>>(),
      vec!["min_discount", "limit"]
    );

    assert!(DealQuery::new(None, None, None, Some(-0.5), None).is_err());
    assert!(DealQuery::new(None, None, None, None, Some(201)).is_err());
    assert_eq!(
      DealQuery::new(None, None, None, Some(100.0), Some(200)).unwrap().limit,
      200
    );
  }

  #[test]
  fn rank_orders_by_discount_then_price() {
    let mut deals = vec![
      model("a", 80.0, Some(20.0)),
      model("b", 50.0, Some(50.0)),
      model("c", 10.0, None),
      model("d", 40.0, Some(50.0)),
      model("e", 5.0, Some(0.0)),
    ];
    rank(&mut deals);

    let titles: Vec<_> = deals.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["d", "b", "a", "e", "c"]);
  }

  #[test]
  fn rank_is_stable_on_full_ties() {
    let mut deals = vec![
      model("first", 10.0, Some(5.0)),
      model("second", 10.0, Some(5.0)),
    ];
    rank(&mut deals);
    assert_eq!(deals[0].title, "first");
  }
}
