use super::{ValidationErrors, fields::Fields};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
  pub title: String,
  pub description: Option<String>,
  pub price: f64,
  pub category: String,
  pub in_stock: bool,
}

impl ProductPayload {
  pub fn from_json(document: &json::Value) -> Result<Self, ValidationErrors> {
    let mut fields = Fields::of(document)?;

    let title = fields.text("title");
    let description = fields.opt_text("description");
    let price = fields.number("price");
    if let Some(price) = price {
      fields.check(price.is_finite() && price >= 0.0, "price", "must be >= 0");
    }
    let category = fields.text("category");
    let in_stock = fields.flag("in_stock", true);

    let (Some(title), Some(price), Some(category)) = (title, price, category)
    else {
      return Err(fields.into_errors());
    };

    fields.finish(Self { title, description, price, category, in_stock })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mug(price: f64) -> json::Value {
    json::json!({ "title": "Mug", "price": price, "category": "Home" })
  }

  #[test]
  fn negative_price_is_rejected() {
    assert!(ProductPayload::from_json(&mug(-0.5)).is_err());

    let product = ProductPayload::from_json(&mug(0.0)).unwrap();
    assert!(product.in_stock);
    assert_eq!(product.description, None);
  }

  #[test]
  fn mistyped_stock_flag_is_reported() {
    let mut product = mug(3.0);
    product["in_stock"] = "yes".into();
    let errors = ProductPayload::from_json(&product).unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["in_stock"]);
  }
}
