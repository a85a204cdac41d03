//! Material Model

use serde::{Deserialize, Serialize};

/// Material entity (flat registry, referenced by attribute values)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
}

/// Create material payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCreate {
    pub id: String,
    pub name: String,
}

/// Update material payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialUpdate {
    pub name: Option<String>,
}
