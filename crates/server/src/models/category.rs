use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub type CategoryId = Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResourceCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
}

/// Category selector shared by search and upload. `All` never names a target category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn matches(&self, category_id: &CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => id == category_id,
        }
    }

    pub fn selected(&self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(*id),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(Self::ALL) {
            return Ok(Self::All);
        }
        Uuid::parse_str(value)
            .map(Self::Category)
            .map_err(|_| ValidationError::InvalidInput {
                value: value.to_string(),
                reason: format!("category should be `{}` or a category id", Self::ALL),
            })
    }
}

pub fn default_categories() -> Vec<CreateCategoryRequest> {
    [
        ("Quiz Packs", "Ready-made quiz rounds and answer sheets for group sessions"),
        ("Newsletters", "Monthly newsletters to share with residents and families"),
        (
            "Reminiscence Materials",
            "Photos, music and prompts for reminiscence activities",
        ),
    ]
    .into_iter()
    .map(|(name, description)| CreateCategoryRequest {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}
