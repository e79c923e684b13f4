use rust_decimal::Decimal;
use serde::Deserialize;
use std::cmp::Ordering;

use crate::models::CatalogItem;

/// Menu query parameters as supplied by the presentation layer
/// All fields are optional to support flexible querying
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQueryParams {
    /// Search term for partial name matching (case-insensitive)
    pub search: Option<String>,
    /// Filter by category (case-insensitive exact match)
    pub category: Option<String>,
    /// Only organic items
    #[serde(default)]
    pub organic: bool,
    /// Only fair-trade items
    #[serde(default)]
    pub fair_trade: bool,
    /// Minimum price filter (inclusive)
    pub min_price: Option<Decimal>,
    /// Maximum price filter (inclusive)
    pub max_price: Option<Decimal>,
    /// Sort field: "price", "sustainability" or "name"
    pub sort: Option<String>,
    /// Sort order: "asc" or "desc"
    pub order: Option<String>,
}

/// Sort field options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Sustainability,
    Name,
}

/// Sort order options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validated and normalized menu query
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMenuQuery {
    /// Lowercased search term (trimmed, None if empty)
    pub search: Option<String>,
    /// Lowercased category (trimmed, None if empty)
    pub category: Option<String>,
    pub organic: bool,
    pub fair_trade: bool,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Sort field (None keeps catalog order)
    pub sort_field: Option<SortField>,
    pub sort_order: SortOrder,
}

impl ValidatedMenuQuery {
    /// Whether an item passes every filter
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(ref search) = self.search {
            if !item.name.to_lowercase().contains(search.as_str()) {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if item.category.to_lowercase() != *category {
                return false;
            }
        }
        if self.organic && !item.organic {
            return false;
        }
        if self.fair_trade && !item.fair_trade {
            return false;
        }
        if let Some(min) = self.min_price {
            if item.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price > max {
                return false;
            }
        }
        true
    }

    /// Filter and sort the given items; the sort is stable
    pub fn apply<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        let mut selected: Vec<&CatalogItem> = items.iter().filter(|item| self.matches(item)).collect();

        if let Some(field) = self.sort_field {
            selected.sort_by(|a, b| {
                let ordering = match field {
                    SortField::Price => a.price.cmp(&b.price),
                    SortField::Sustainability => a
                        .sustainability_rating
                        .partial_cmp(&b.sustainability_rating)
                        .unwrap_or(Ordering::Equal),
                    SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                };
                match self.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        selected
    }
}

/// Menu query validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MenuQueryError {
    pub message: String,
}

impl MenuQueryError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Menu query validator
pub struct MenuQueryValidator;

impl MenuQueryValidator {
    /// Validates and normalizes menu query parameters
    pub fn validate(params: MenuQueryParams) -> Result<ValidatedMenuQuery, MenuQueryError> {
        let search = Self::normalize_string(params.search);
        let category = Self::normalize_string(params.category);

        let min_price = params
            .min_price
            .map(|price| Self::validate_price(price, "min_price"))
            .transpose()?;
        let max_price = params
            .max_price
            .map(|price| Self::validate_price(price, "max_price"))
            .transpose()?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(MenuQueryError::new(
                    "min_price cannot be greater than max_price",
                ));
            }
        }

        let sort_field = params
            .sort
            .as_deref()
            .map(Self::parse_sort_field)
            .transpose()?;

        // Default order depends on sort field
        let sort_order = match params.order.as_deref() {
            Some(order) => Self::parse_sort_order(order)?,
            None => match sort_field {
                Some(SortField::Sustainability) => SortOrder::Desc,
                _ => SortOrder::Asc,
            },
        };

        Ok(ValidatedMenuQuery {
            search,
            category,
            organic: params.organic,
            fair_trade: params.fair_trade,
            min_price,
            max_price,
            sort_field,
            sort_order,
        })
    }

    /// Trims and lowercases; None if the string is empty or whitespace-only
    fn normalize_string(s: Option<String>) -> Option<String> {
        s.and_then(|s| {
            let trimmed = s.trim().to_lowercase();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    /// Price bounds may be zero but never negative
    fn validate_price(price: Decimal, param_name: &str) -> Result<Decimal, MenuQueryError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(MenuQueryError::new(format!(
                "{} must not be negative",
                param_name
            )));
        }
        Ok(price)
    }

    fn parse_sort_field(s: &str) -> Result<SortField, MenuQueryError> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortField::Price),
            "sustainability" | "sustainability_rating" | "rating" => Ok(SortField::Sustainability),
            "name" => Ok(SortField::Name),
            _ => Err(MenuQueryError::new(format!(
                "Invalid sort field '{}'. Must be 'price', 'sustainability' or 'name'",
                s
            ))),
        }
    }

    fn parse_sort_order(s: &str) -> Result<SortOrder, MenuQueryError> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(MenuQueryError::new(format!(
                "Invalid sort order '{}'. Must be 'asc' or 'desc'",
                s
            ))),
        }
    }
}
