use super::{ValidationErrors, fields::Fields, is_http_url};
use crate::entity::Category;

/// A deal that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
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
}

const URL_RULE: &str = "must be an absolute http(s) URL";

fn non_negative(v: f64) -> bool {
  v.is_finite() && v >= 0.0
}

impl NewDeal {
  /// Read a deal body, reporting every missing, mistyped or out-of-range
  /// field at once.
  pub fn from_json(document: &json::Value) -> Result<Self, ValidationErrors> {
    let mut fields = Fields::of(document)?;

    let title = fields.text("title");
    let brand = fields.text("brand");

    let category = fields.text("category");
    let allowed = Category::ALL.map(|c| (c.as_str(), c));
    let category = fields.choice("category", category, &allowed);

    let url = fields.text("url");
    if let Some(url) = &url {
      fields.check(is_http_url(url), "url", URL_RULE);
    }
    let image = fields.opt_text("image");
    if let Some(image) = &image {
      fields.check(is_http_url(image), "image", URL_RULE);
    }

    let price = fields.number("price");
    if let Some(price) = price {
      fields.check(non_negative(price), "price", "must be >= 0");
    }
    let original_price = fields.opt_number("original_price");
    if let Some(original) = original_price {
      fields.check(non_negative(original), "original_price", "must be >= 0");
    }
    let discount_percent = fields.opt_number("discount_percent");
    if let Some(discount) = discount_percent {
      fields.check(
        non_negative(discount) && discount <= 100.0,
        "discount_percent",
        "must be between 0 and 100",
      );
    }

    let tags = fields.opt_text_list("tags");
    let store = fields.opt_text("store");

    let (Some(title), Some(brand), Some(category), Some(url), Some(price)) =
      (title, brand, category, url, price)
    else {
      return Err(fields.into_errors());
    };

    fields.finish(Self {
      title,
      brand,
      category,
      url,
      image,
      price,
      original_price,
      discount_percent,
      tags,
      store,
    })
  }
}
