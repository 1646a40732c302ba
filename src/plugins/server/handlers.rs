use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
  prelude::*,
  schema::{NewDeal, Schema, ValidationErrors},
  state::AppState,
  sv::{DealItem, DealQuery},
  utils::truncate,
};

type App = State<Arc<AppState>>;

#[derive(Serialize)]
pub struct Message {
  message: &'static str,
}

#[derive(Serialize)]
pub struct Items<T> {
  items: Vec<T>,
}

#[derive(Serialize)]
pub struct Schemas {
  schemas: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct Valid {
  valid: bool,
}

#[derive(Serialize)]
pub struct Created {
  id: String,
  status: &'static str,
}

/// Store connectivity report. Informational only.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
  backend: &'static str,
  database: String,
  database_url: &'static str,
  database_name: &'static str,
  connection_status: &'static str,
  collections: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  q: Option<String>,
  brand: Option<String>,
  category: Option<String>,
  min_discount: Option<f64>,
  limit: Option<i64>,
}

type JsonBody = std::result::Result<Json<json::Value>, JsonRejection>;

fn set_or_not(value: &Option<String>) -> &'static str {
  if value.is_some() { "✅ Set" } else { "❌ Not Set" }
}

/// Only bodies that are not JSON at all collapse into a single `body` entry;
/// anything else is checked field by field.
fn document(body: JsonBody) -> Result<json::Value> {
  match body {
    Ok(Json(document)) => Ok(document),
    Err(rejection) => Err(ValidationErrors::body(rejection.body_text()).into()),
  }
}

pub async fn root() -> Json<Message> {
  Json(Message { message: "Deals Finder backend is running" })
}

pub async fn test_database(State(app): App) -> Json<Diagnostics> {
  let mut report = Diagnostics {
    backend: "✅ Running",
    database: "❌ Not Available".into(),
    database_url: set_or_not(&app.config.database_url),
    database_name: set_or_not(&app.config.database_name),
    connection_status: "Not Connected",
    collections: Vec::new(),
  };

  if let Some(store) = app.store() {
    report.database = "✅ Available".into();
    report.connection_status = "Connected";
    report.database = match store.collections().await {
      Ok(mut collections) => {
        collections.truncate(10);
        report.collections = collections;
        "✅ Connected & Working".into()
      }
      Err(err) => {
        format!("⚠️  Connected but Error: {}", truncate(&err.to_string(), 50))
      }
    };
  } else if app.config.database_url.is_some() {
    report.database = "⚠️  Available but not initialized".into();
  }

  Json(report)
}

pub async fn schema() -> Json<Schemas> {
  Json(Schemas { schemas: Schema::names() })
}

pub async fn validate_document(
  Path(name): Path<String>,
  body: JsonBody,
) -> Result<Json<Valid>> {
  let schema = Schema::from_name(&name).ok_or(Error::UnknownSchema(name))?;
  schema.validate(&document(body)?)?;
  Ok(Json(Valid { valid: true }))
}

pub async fn create_deal(
  State(app): App,
  body: JsonBody,
) -> Result<Json<Created>> {
  let deal = NewDeal::from_json(&document(body)?)?;
  let id = app.deals().create(deal).await?;
  Ok(Json(Created { id, status: "created" }))
}

pub async fn list_deals(
  State(app): App,
  Query(params): Query<SearchParams>,
) -> Result<Json<Items<DealItem>>> {
  let query = DealQuery::new(
    params.q,
    params.brand,
    params.category,
    params.min_discount,
    params.limit,
  )?;
  let items = app.deals().search(&query).await?;
  Ok(Json(Items { items }))
}

pub async fn list_brands(State(app): App) -> Result<Json<Items<String>>> {
  let items = app.deals().brands().await?;
  Ok(Json(Items { items }))
}
