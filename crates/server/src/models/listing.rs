use serde::Deserialize;

use crate::catalog::search::ResourceFilter;
use crate::error::{RequestError, ValidationError};
use crate::models::category::CategoryFilter;
use crate::server::constants::MAX_SEARCH_TERM_LENGTH;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

pub fn validate_search_term(term: &str) -> Result<(), RequestError> {
    let length = term.chars().count();
    if length > MAX_SEARCH_TERM_LENGTH {
        return Err(ValidationError::LimitExceeded {
            subject: "search term".to_string(),
            unit: "character".to_string(),
            attempted: length,
            limit: MAX_SEARCH_TERM_LENGTH,
        }
        .into());
    }
    Ok(())
}

impl ResourceFilter {
    pub fn from_query(query: SearchQuery) -> Result<Self, RequestError> {
        let term = query.q.unwrap_or_default();
        validate_search_term(&term)?;
        let category = match query.category {
            Some(category) => category.parse::<CategoryFilter>()?,
            None => CategoryFilter::All,
        };
        Ok(Self::new(&term, category))
    }
}
