use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Keys every create/update body must carry. `id` is owned by the store.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "description", "price", "available", "category"];

/// Largest magnitude a `NUMERIC(14, 2)` column can hold.
fn max_price() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Product category, stored and serialized by name
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(sea_orm::sea_query::StringLen::N(32))"
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

impl Category {
    /// Looks up a member by its exact (upper-case) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Category::from_str(name).ok()
    }
}

/// A catalog product.
///
/// `id` is `None` until the product has been persisted. Serializes as
/// `{id, name, description, price, available, category}` with `price` as a
/// two-decimal string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: Option<i32>,
    #[schema(example = "Fedora")]
    pub name: String,
    #[schema(example = "A red hat")]
    pub description: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

/// Body accepted by create and update. All fields are required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Fedora",
    "description": "A red hat",
    "price": "12.50",
    "available": true,
    "category": "CLOTHS"
}))]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: String,
    /// Number or numeric string
    #[serde(deserialize_with = "price_from_json")]
    #[schema(value_type = String)]
    pub price: Decimal,
    pub available: bool,
    pub category: String,
}

fn price_from_json<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    (&value)
        .into_price()
        .map_err(|e| serde::de::Error::custom(e.to_string()))
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl IntoPrice,
        available: bool,
        category: Category,
    ) -> ProductResult<Self> {
        Ok(Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price: price.into_price()?,
            available,
            category,
        })
    }

    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.to_string(),
        })
    }

    /// Overwrites every field except `id` from a JSON object.
    ///
    /// Fails without touching `self` when the input is not an object, a
    /// required key is missing, a value has the wrong type, the category is
    /// unknown or the name is empty.
    pub fn deserialize(&mut self, data: &Value) -> ProductResult<&mut Self> {
        let Value::Object(map) = data else {
            return Err(ProductError::Validation(
                "Invalid product: body of request contained bad or no data".to_string(),
            ));
        };

        if let Some(missing) = missing_field(map) {
            return Err(ProductError::MissingField(missing));
        }

        let payload = ProductPayload::deserialize(data)
            .map_err(|e| ProductError::Validation(format!("Invalid product: {}", e)))?;

        payload
            .validate()
            .map_err(|e| ProductError::Validation(format!("Invalid product: {}", e)))?;

        let category = Category::from_name(&payload.category).ok_or_else(|| {
            ProductError::Validation(format!("Invalid category: {}", payload.category))
        })?;

        self.name = payload.name;
        self.description = payload.description;
        self.price = payload.price;
        self.available = payload.available;
        self.category = category;
        Ok(self)
    }
}

fn missing_field(map: &Map<String, Value>) -> Option<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .find(|field| !map.contains_key(*field))
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

/// Values that can be turned into a two-decimal price.
pub trait IntoPrice {
    fn into_price(self) -> ProductResult<Decimal>;
}

fn normalize_price(price: Decimal) -> ProductResult<Decimal> {
    let mut price = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if price.abs() > max_price() {
        return Err(ProductError::Validation(format!(
            "Invalid price: {} is out of range",
            price
        )));
    }
    price.rescale(2);
    Ok(price)
}

impl IntoPrice for Decimal {
    fn into_price(self) -> ProductResult<Decimal> {
        normalize_price(self)
    }
}

impl IntoPrice for i64 {
    fn into_price(self) -> ProductResult<Decimal> {
        normalize_price(Decimal::from(self))
    }
}

impl IntoPrice for f64 {
    fn into_price(self) -> ProductResult<Decimal> {
        Decimal::try_from(self)
            .map_err(|_| ProductError::Validation(format!("Invalid price: {}", self)))
            .and_then(normalize_price)
    }
}

impl IntoPrice for &str {
    fn into_price(self) -> ProductResult<Decimal> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ProductError::Validation(format!("Invalid price: '{}'", self)))
            .and_then(normalize_price)
    }
}

impl IntoPrice for String {
    fn into_price(self) -> ProductResult<Decimal> {
        self.as_str().into_price()
    }
}

impl IntoPrice for &Value {
    fn into_price(self) -> ProductResult<Decimal> {
        match self {
            Value::Number(n) => n.to_string().as_str().into_price(),
            Value::String(s) => s.as_str().into_price(),
            other => Err(ProductError::Validation(format!(
                "Invalid price: expected a number or numeric string, got {}",
                other
            ))),
        }
    }
}

/// A single-attribute product query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Name(String),
    Category(Category),
    Available(bool),
    Price(Decimal),
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Available(available) => product.available == *available,
            ProductFilter::Price(price) => product.price == *price,
        }
    }

    /// Builds a filter from list-endpoint query parameters.
    ///
    /// At most one distinct key is allowed. Keys are matched
    /// case-insensitively against `name`, `category` and `available`;
    /// `available` is true only for the value `true` in any case.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> ProductResult<Self> {
        let distinct: BTreeSet<&str> = pairs.iter().map(|(key, _)| key.as_str()).collect();
        if distinct.len() > 1 {
            return Err(ProductError::Validation(
                "Only one query parameter is supported".to_string(),
            ));
        }

        let Some((key, value)) = pairs.first() else {
            return Ok(ProductFilter::All);
        };

        match key.to_lowercase().as_str() {
            "name" => Ok(ProductFilter::Name(value.clone())),
            "category" => Category::from_name(value)
                .map(ProductFilter::Category)
                .ok_or_else(|| ProductError::Validation(format!("Invalid category: {}", value))),
            "available" => Ok(ProductFilter::Available(value.eq_ignore_ascii_case("true"))),
            _ => Err(ProductError::Validation(format!(
                "Unsupported query parameter: {}",
                key
            ))),
        }
    }
}
