//! # Order Decoding
//!
//! Turns order JSON from the order-entry surface into typed records.
//!
//! ## Decoding Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        JSON → OrderLineItem                             │
//! │                                                                         │
//! │  JSON text                                                             │
//! │     │  serde: shape only (objects, known keys)                         │
//! │     │  unknown key ("chocolatePump") ──────────► CoreError::Json        │
//! │     ▼                                                                   │
//! │  RawLineItem (field values still untyped)                              │
//! │     │  drinkType → size → whippedCream → almondMilk                    │
//! │     │  → chocolatePumps → itemType → topping                           │
//! │     │  first bad value ────────────────────────► InvalidArgument        │
//! │     ▼                                                                   │
//! │  OrderLineItem                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pump range (0-6) is a pricing rule and stays with the engine. Decoding
//! only insists that the count is an integer.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::types::{BreakfastItem, BreakfastItemType, BreakfastTopping, DrinkOrder, OrderLineItem};

/// Parses a JSON array of order lines.
///
/// ## Errors
/// - [`CoreError::Json`] for malformed JSON, missing keys or unknown keys
/// - [`CoreError::InvalidArgument`] for the first line with a bad value
///
/// ## Example
/// ```rust
/// use cafe_core::{parse_order, PricingEngine};
///
/// let items = parse_order(r#"[{"drinkType":"hot","size":"S","whippedCream":true}]"#).unwrap();
/// assert_eq!(PricingEngine::standard().price_order(&items).unwrap().breakdown[0].price, 2.5);
///
/// let err = parse_order(r#"[{"drinkType":"iced","size":"S","whippedCream":true}]"#).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid drinkType 'iced'. Please choose from hot, cold, blended, milk_tea.");
/// ```
pub fn parse_order(json: &str) -> CoreResult<Vec<OrderLineItem>> {
    let lines: Vec<RawLineItem> = serde_json::from_str(json)?;
    lines
        .into_iter()
        .map(RawLineItem::into_line_item)
        .collect::<ValidationResult<_>>()
        .map_err(CoreError::from)
}

// =============================================================================
// Raw Records
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawDrinkOrder {
    drink_type: Value,
    size: Value,
    whipped_cream: Value,
    #[serde(default)]
    almond_milk: Value,
    #[serde(default)]
    chocolate_pumps: Value,
}

impl RawDrinkOrder {
    pub(crate) fn into_drink(self) -> ValidationResult<DrinkOrder> {
        Ok(DrinkOrder {
            drink_type: choice(self.drink_type)?,
            size: choice(self.size)?,
            whipped_cream: flag("whippedCream", self.whipped_cream)?,
            almond_milk: optional_flag("almondMilk", self.almond_milk)?,
            chocolate_pumps: pump_count(self.chocolate_pumps)?,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawBreakfastItem {
    item_type: Value,
    #[serde(default)]
    topping: Value,
}

impl RawBreakfastItem {
    pub(crate) fn into_breakfast(self) -> ValidationResult<BreakfastItem> {
        let item_type: BreakfastItemType = choice(self.item_type)?;

        let allowed = item_type.allowed_topping_names();
        let topping = match self.topping {
            Value::Null => None,
            Value::String(name) if allowed.contains(&name.as_str()) => {
                Some(name.parse::<BreakfastTopping>()?)
            }
            other => {
                return Err(ValidationError::NotAllowed {
                    field: "topping",
                    value: plain(other),
                    allowed,
                })
            }
        };

        Ok(BreakfastItem { item_type, topping })
    }
}

/// A line item with the drink keys inline. `flatten` cannot be combined with
/// `deny_unknown_fields`, so the drink keys are repeated here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawLineItem {
    drink_type: Value,
    size: Value,
    whipped_cream: Value,
    #[serde(default)]
    almond_milk: Value,
    #[serde(default)]
    chocolate_pumps: Value,
    #[serde(default)]
    breakfast: Option<RawBreakfastItem>,
}

impl RawLineItem {
    pub(crate) fn into_line_item(self) -> ValidationResult<OrderLineItem> {
        let drink = RawDrinkOrder {
            drink_type: self.drink_type,
            size: self.size,
            whipped_cream: self.whipped_cream,
            almond_milk: self.almond_milk,
            chocolate_pumps: self.chocolate_pumps,
        }
        .into_drink()?;

        let breakfast = self
            .breakfast
            .map(RawBreakfastItem::into_breakfast)
            .transpose()?;

        Ok(OrderLineItem { drink, breakfast })
    }
}

// =============================================================================
// Field Decoders
// =============================================================================

/// Enum value from its wire spelling. Non-strings are reported like unknown
/// names, so `3` reads "Invalid drinkType '3'. Please choose from ...".
fn choice<T>(value: Value) -> ValidationResult<T>
where
    T: FromStr<Err = ValidationError>,
{
    plain(value).parse()
}

/// Deserializes an enum through its `FromStr`, keeping the validation message.
pub(crate) fn wire_choice<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = ValidationError>,
{
    choice(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}

fn flag(field: &'static str, value: Value) -> ValidationResult<bool> {
    value.as_bool().ok_or_else(|| ValidationError::InvalidType {
        field,
        value: plain(value),
        expected: "true or false",
    })
}

fn optional_flag(field: &'static str, value: Value) -> ValidationResult<bool> {
    match value {
        Value::Null => Ok(false),
        other => flag(field, other),
    }
}

fn pump_count(value: Value) -> ValidationResult<i32> {
    const FIELD: &str = "chocolatePumps";

    let count = match &value {
        Value::Null => return Ok(0),
        Value::Number(number) => number.as_i64(),
        _ => None,
    };
    let Some(count) = count else {
        return Err(ValidationError::InvalidType {
            field: FIELD,
            value: plain(value),
            expected: "a whole number",
        });
    };

    i32::try_from(count).map_err(|_| ValidationError::OutOfRange {
        field: FIELD,
        value: count,
        min: 0,
        max: crate::MAX_CHOCOLATE_PUMPS as i64,
    })
}

/// Strings without their JSON quotes, everything else as JSON.
fn plain(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
