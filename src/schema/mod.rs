//! Validation shapes for the collections the service knows about.
//!
//! Every shape is checked by an explicit function that collects all failing
//! fields instead of stopping at the first one.

pub mod deal;
mod fields;
pub mod policy;
pub mod product;
pub mod user;

use std::fmt;

use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

pub use deal::NewDeal;
pub use policy::PolicyPayload;
pub use product::ProductPayload;
pub use user::UserPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
  User,
  Product,
  Policy,
  Deal,
}

impl Schema {
  pub const ALL: [Schema; 4] =
    [Schema::User, Schema::Product, Schema::Policy, Schema::Deal];

  pub fn name(&self) -> &'static str {
    match self {
      Schema::User => "user",
      Schema::Product => "product",
      Schema::Policy => "policy",
      Schema::Deal => "deal",
    }
  }

  pub fn names() -> Vec<&'static str> {
    Self::ALL.iter().map(Schema::name).collect()
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.name() == name)
  }

  /// Check an arbitrary document against this shape.
  pub fn validate(
    &self,
    document: &json::Value,
  ) -> Result<(), ValidationErrors> {
    match self {
      Schema::User => UserPayload::from_json(document).map(drop),
      Schema::Product => ProductPayload::from_json(document).map(drop),
      Schema::Policy => PolicyPayload::from_json(document).map(drop),
      Schema::Deal => NewDeal::from_json(document).map(drop),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub constraint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  /// A body that could not be read as JSON at all.
  pub fn body(reason: impl Into<String>) -> Self {
    let mut errors = Self::default();
    errors.push("body", reason);
    errors
  }

  pub fn push(
    &mut self,
    field: impl Into<String>,
    constraint: impl Into<String>,
  ) {
    self
      .0
      .push(FieldError { field: field.into(), constraint: constraint.into() });
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(|e| e.field.as_str())
  }

  /// `Ok(value)` when nothing failed.
  pub fn finish<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }

  pub(crate) fn check(
    &mut self,
    ok: bool,
    field: &str,
    constraint: impl Into<String>,
  ) {
    if !ok {
      self.push(field, constraint);
    }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, err) in self.0.iter().enumerate() {
      if i > 0 {
        write!(f, "; ")?;
      }
      write!(f, "{}: {}", err.field, err.constraint)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

/// Absolute http(s) URL with a host.
pub(crate) fn is_http_url(value: &str) -> bool {
  let lower = value.to_ascii_lowercase();
  (lower.starts_with("http://") || lower.starts_with("https://"))
    && value.validate_url()
}

pub(crate) fn is_email(value: &str) -> bool {
  value.validate_email()
}
