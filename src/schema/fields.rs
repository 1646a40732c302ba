use json::{Map, Value};

use super::ValidationErrors;

/// Reads one field at a time out of a JSON object, recording every missing
/// or mistyped field instead of stopping at the first.
///
/// `null` counts as absent.
pub struct Fields<'a> {
  map: &'a Map<String, Value>,
  errors: ValidationErrors,
}

impl<'a> Fields<'a> {
  pub fn of(document: &'a Value) -> Result<Self, ValidationErrors> {
    match document.as_object() {
      Some(map) => Ok(Self { map, errors: ValidationErrors::default() }),
      None => Err(ValidationErrors::body("must be a JSON object")),
    }
  }

  fn get(&self, name: &str) -> Option<&'a Value> {
    self.map.get(name).filter(|v| !v.is_null())
  }

  fn required<T>(
    &mut self,
    name: &str,
    read: impl FnOnce(&mut Self, &str) -> Option<T>,
  ) -> Option<T> {
    if self.get(name).is_none() {
      self.errors.push(name, "field required");
      return None;
    }
    read(self, name)
  }

  fn typed<T>(
    &mut self,
    name: &str,
    expected: &str,
    convert: impl FnOnce(&'a Value) -> Option<T>,
  ) -> Option<T> {
    let value = self.get(name)?;
    let converted = convert(value);
    if converted.is_none() {
      self.errors.push(name, format!("must be {expected}"));
    }
    converted
  }

  pub fn opt_text(&mut self, name: &str) -> Option<String> {
    self.typed(name, "a string", |v| v.as_str().map(String::from))
  }

  pub fn text(&mut self, name: &str) -> Option<String> {
    self.required(name, Self::opt_text)
  }

  pub fn opt_number(&mut self, name: &str) -> Option<f64> {
    self.typed(name, "a number", Value::as_f64)
  }

  pub fn number(&mut self, name: &str) -> Option<f64> {
    self.required(name, Self::opt_number)
  }

  pub fn opt_integer(&mut self, name: &str) -> Option<i64> {
    self.typed(name, "an integer", Value::as_i64)
  }

  pub fn integer(&mut self, name: &str) -> Option<i64> {
    self.required(name, Self::opt_integer)
  }

  pub fn flag(&mut self, name: &str, default: bool) -> bool {
    self.typed(name, "a boolean", Value::as_bool).unwrap_or(default)
  }

  pub fn opt_text_list(&mut self, name: &str) -> Option<Vec<String>> {
    self.typed(name, "a list of strings", |v| {
      v.as_array()?.iter().map(|t| t.as_str().map(String::from)).collect()
    })
  }

  /// Parse a closed set of string values, listing them on failure.
  pub fn choice<T: Copy>(
    &mut self,
    name: &str,
    value: Option<String>,
    allowed: &[(&str, T)],
  ) -> Option<T> {
    let value = value?;
    let found = allowed.iter().find(|(s, _)| *s == value).map(|(_, v)| *v);
    if found.is_none() {
      let names: Vec<_> = allowed.iter().map(|(s, _)| *s).collect();
      self.errors.push(name, format!("must be one of {}", names.join(", ")));
    }
    found
  }

  pub fn check(&mut self, ok: bool, name: &str, constraint: impl Into<String>) {
    self.errors.check(ok, name, constraint);
  }

  pub fn into_errors(self) -> ValidationErrors {
    self.errors
  }

  pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
    self.errors.finish(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collects_missing_and_mistyped_fields() {
    let document = json::json!({
      "name": 3,
      "age": "old",
      "tags": ["a", 1],
      "note": null
    });
    let mut fields = Fields::of(&document).unwrap();

    assert_eq!(fields.text("name"), None);
    assert_eq!(fields.integer("age"), None);
    assert_eq!(fields.text("email"), None);
    assert_eq!(fields.opt_text("note"), None);
    assert_eq!(fields.opt_text_list("tags"), None);
    assert!(fields.flag("active", true));

    let errors = fields.into_errors();
    assert_eq!(
      errors.fields().collect::<Vec<_>>(),
      vec!["name", "age", "email", "tags"]
    );
  }

  #[test]
  fn reads_well_typed_values() {
    let document = json::json!({
      "title": "Tee",
      "price": 10,
      "days": 30,
      "tags": ["x", "y"],
      "active": false
    });
    let mut fields = Fields::of(&document).unwrap();

    assert_eq!(fields.text("title").as_deref(), Some("Tee"));
    assert_eq!(fields.number("price"), Some(10.0));
    assert_eq!(fields.integer("days"), Some(30));
    assert_eq!(
      fields.opt_text_list("tags"),
      Some(vec!["x".to_string(), "y".to_string()])
    );
    assert!(!fields.flag("active", true));
    assert!(fields.finish(()).is_ok());
  }

  #[test]
  fn non_objects_are_rejected() {
    let errors = Fields::of(&json::json!([1, 2])).err().unwrap();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["body"]);
  }
}
