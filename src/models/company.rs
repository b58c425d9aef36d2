use serde::{Deserialize, Serialize};

/// Row of the `companies` collection, projected to `id, name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}
