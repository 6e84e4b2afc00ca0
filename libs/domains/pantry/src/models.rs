use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use utoipa::{IntoParams, ToSchema};

use crate::error::PantryError;

/// Wire format of `expiryDate`
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Items at or below this count are flagged for purchase
pub const RESTOCK_THRESHOLD: i64 = 1;

/// Pantry item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    /// Identifier assigned by the repository, never reused
    pub id: i64,
    /// Item name, unique at creation time
    pub name: String,
    pub description: String,
    /// Free-text category (e.g. "dairy")
    pub item_type: String,
    /// Quantity on hand
    pub count: i64,
    /// Expiry date as `YYYY-MM-DD`
    #[schema(example = "2099-01-01")]
    pub expiry_date: String,
    /// Derived: the expiry date has passed
    pub is_expired: bool,
    /// Derived: `count <= 1`
    pub buy: bool,
}

/// DTO for creating a pantry item.
///
/// Missing fields take their zero value. `id`, `isExpired` and `buy` are not
/// part of the DTO, so values sent for them are dropped during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePantryItem {
    pub name: String,
    pub description: String,
    pub item_type: String,
    pub count: i64,
    #[schema(example = "2099-01-01")]
    pub expiry_date: String,
}

/// DTO for replacing a pantry item.
///
/// This is a full replacement, not a patch: a field missing from the body
/// resets the stored value to its zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePantryItem {
    pub name: String,
    pub description: String,
    pub item_type: String,
    pub count: i64,
    #[schema(example = "2099-01-01")]
    pub expiry_date: String,
}

/// Body of `POST /pantryItems`: one item or a batch.
///
/// A JSON array decodes as a batch, anything else as a single item, so a bad
/// field reports serde's own message rather than a generic variant mismatch.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreatePayload {
    Batch(Vec<CreatePantryItem>),
    Single(CreatePantryItem),
}

impl<'de> Deserialize<'de> for CreatePayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let payload = if value.is_array() {
            serde_json::from_value(value).map(CreatePayload::Batch)
        } else {
            serde_json::from_value(value).map(CreatePayload::Single)
        };
        payload.map_err(D::Error::custom)
    }
}

/// Response of `POST /pantryItems`, shaped like the request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreatedItems {
    Batch(Vec<PantryItem>),
    Single(PantryItem),
}

/// Raw query string of `GET /pantryItems`.
///
/// Boolean parameters stay strings here so an invalid value can be reported
/// by name instead of as a generic query rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the description
    pub description: Option<String>,
    /// Case-insensitive substring of the item type
    pub item_type: Option<String>,
    /// Exact match on the derived expiry flag
    pub is_expired: Option<String>,
    /// Exact match on the derived purchase flag
    pub buy: Option<String>,
}

/// Parsed listing filter. `None` means "no constraint", every field AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub item_type: Option<String>,
    pub is_expired: Option<bool>,
    pub buy: Option<bool>,
}

impl ItemQuery {
    /// Builds the query from raw key/value pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "description" => &mut query.description,
                "itemType" => &mut query.item_type,
                "isExpired" => &mut query.is_expired,
                "buy" => &mut query.buy,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        query
    }
}

impl TryFrom<ItemQuery> for ItemFilter {
    type Error = PantryError;

    fn try_from(query: ItemQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            name: query.name,
            description: query.description,
            item_type: query.item_type,
            is_expired: parse_bool_param("isExpired", query.is_expired.as_deref())?,
            buy: parse_bool_param("buy", query.buy.as_deref())?,
        })
    }
}

impl ItemFilter {
    pub fn matches(&self, item: &PantryItem) -> bool {
        contains_ignore_case(&item.name, self.name.as_deref())
            && contains_ignore_case(&item.description, self.description.as_deref())
            && contains_ignore_case(&item.item_type, self.item_type.as_deref())
            && self.is_expired.is_none_or(|wanted| item.is_expired == wanted)
            && self.buy.is_none_or(|wanted| item.buy == wanted)
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Accepts the usual boolean spellings: 1, t, T, TRUE, true, True and their false counterparts.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_bool_param(param: &'static str, value: Option<&str>) -> Result<Option<bool>, PantryError> {
    value
        .map(|raw| parse_bool(raw).ok_or(PantryError::InvalidQueryValue { param }))
        .transpose()
}

/// An item is expired once its expiry date (midnight UTC) lies before `now`.
/// Dates that do not parse never count as expired.
pub fn is_expired(expiry_date: &str, now: DateTime<Utc>) -> bool {
    NaiveDate::parse_from_str(expiry_date, EXPIRY_DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc() < now)
        .unwrap_or(false)
}

pub fn needs_restock(count: i64) -> bool {
    count <= RESTOCK_THRESHOLD
}

impl PantryItem {
    /// Build a stored item from a create DTO; derived flags are computed against `now`.
    pub fn new(id: i64, input: CreatePantryItem, now: DateTime<Utc>) -> Self {
        let mut item = Self {
            id,
            name: input.name,
            description: input.description,
            item_type: input.item_type,
            count: input.count,
            expiry_date: input.expiry_date,
            is_expired: false,
            buy: false,
        };
        item.refresh_derived(now);
        item
    }

    /// Replace every client-writable field; `id` is kept and derived flags recomputed.
    pub fn replace_with(&mut self, update: UpdatePantryItem, now: DateTime<Utc>) {
        self.name = update.name;
        self.description = update.description;
        self.item_type = update.item_type;
        self.count = update.count;
        self.expiry_date = update.expiry_date;
        self.refresh_derived(now);
    }

    pub fn refresh_derived(&mut self, now: DateTime<Utc>) {
        self.is_expired = is_expired(&self.expiry_date, now);
        self.buy = needs_restock(self.count);
    }
}
