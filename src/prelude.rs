pub use std::{collections::HashSet, sync::Arc, time::Duration};

pub use chrono::{NaiveDateTime as DateTime, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
  EntityTrait, QueryFilter, Set,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
