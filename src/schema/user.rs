use super::{ValidationErrors, fields::Fields, is_email};

#[derive(Debug, Clone, PartialEq)]
pub struct UserPayload {
  pub name: String,
  pub email: String,
  pub address: String,
  pub age: Option<i64>,
  pub is_active: bool,
}

impl UserPayload {
  pub fn from_json(document: &json::Value) -> Result<Self, ValidationErrors> {
    let mut fields = Fields::of(document)?;

    let name = fields.text("name");
    let email = fields.text("email");
    if let Some(email) = &email {
      fields.check(is_email(email), "email", "must be a valid email");
    }
    let address = fields.text("address");
    let age = fields.opt_integer("age");
    if let Some(age) = age {
      fields.check((0..=120).contains(&age), "age", "must be between 0 and 120");
    }
    let is_active = fields.flag("is_active", true);

    let (Some(name), Some(email), Some(address)) = (name, email, address)
    else {
      return Err(fields.into_errors());
    };

    fields.finish(Self { name, email, address, age, is_active })
  }
}
