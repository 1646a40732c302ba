//! Staking insurance policy shape.

use super::{ValidationErrors, fields::Fields, is_email};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
  Eth,
  Sol,
  Atom,
  Ada,
  Avax,
  Dot,
  Matic,
  Bnb,
  Other,
}

impl Asset {
  const NAMES: [(&'static str, Asset); 9] = [
    ("ETH", Asset::Eth),
    ("SOL", Asset::Sol),
    ("ATOM", Asset::Atom),
    ("ADA", Asset::Ada),
    ("AVAX", Asset::Avax),
    ("DOT", Asset::Dot),
    ("MATIC", Asset::Matic),
    ("BNB", Asset::Bnb),
    ("Other", Asset::Other),
  ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyStatus {
  #[default]
  Active,
  Cancelled,
  Expired,
  Pending,
}

impl PolicyStatus {
  const NAMES: [(&'static str, PolicyStatus); 4] = [
    ("active", PolicyStatus::Active),
    ("cancelled", PolicyStatus::Cancelled),
    ("expired", PolicyStatus::Expired),
    ("pending", PolicyStatus::Pending),
  ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyPayload {
  pub email: String,
  pub asset: Asset,
  pub amount_staked: f64,
  pub usd_value: f64,
  pub coverage_percent: f64,
  pub duration_days: i64,
  pub premium_usd: f64,
  pub status: PolicyStatus,
}

fn positive(v: f64) -> bool {
  v.is_finite() && v > 0.0
}

impl PolicyPayload {
  pub fn from_json(document: &json::Value) -> Result<Self, ValidationErrors> {
    let mut fields = Fields::of(document)?;

    let email = fields.text("email");
    if let Some(email) = &email {
      fields.check(is_email(email), "email", "must be a valid email");
    }
    let asset = fields.text("asset");
    let asset = fields.choice("asset", asset, &Asset::NAMES);

    let amount_staked = fields.number("amount_staked");
    if let Some(v) = amount_staked {
      fields.check(positive(v), "amount_staked", "must be > 0");
    }
    let usd_value = fields.number("usd_value");
    if let Some(v) = usd_value {
      fields.check(positive(v), "usd_value", "must be > 0");
    }
    let coverage_percent = fields.number("coverage_percent");
    if let Some(v) = coverage_percent {
      fields.check(
        positive(v) && v <= 100.0,
        "coverage_percent",
        "must be > 0 and <= 100",
      );
    }
    let duration_days = fields.integer("duration_days");
    if let Some(v) = duration_days {
      fields.check(
        (7..=365).contains(&v),
        "duration_days",
        "must be between 7 and 365",
      );
    }
    let premium_usd = fields.number("premium_usd");
    if let Some(v) = premium_usd {
      fields.check(v.is_finite() && v >= 0.0, "premium_usd", "must be >= 0");
    }

    let status = fields.opt_text("status");
    let status = match status {
      Some(_) => fields.choice("status", status, &PolicyStatus::NAMES),
      None => Some(PolicyStatus::default()),
    };

    let (
      Some(email),
      Some(asset),
      Some(amount_staked),
      Some(usd_value),
      Some(coverage_percent),
      Some(duration_days),
      Some(premium_usd),
      Some(status),
    ) = (
      email,
      asset,
      amount_staked,
      usd_value,
      coverage_percent,
      duration_days,
      premium_usd,
      status,
    )
    else {
      return Err(fields.into_errors());
    };

    fields.finish(Self {
      email,
      asset,
      amount_staked,
      usd_value,
      coverage_percent,
      duration_days,
      premium_usd,
      status,
    })
  }
}
