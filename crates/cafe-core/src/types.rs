//! # Domain Types
//!
//! Order records priced by the engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   DrinkOrder    │   │  BreakfastItem  │   │  OrderLineItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  drink_type     │   │  item_type      │   │  drink          │       │
//! │  │  size           │   │  topping?       │   │  breakfast?     │       │
//! │  │  whipped_cream  │   └─────────────────┘   └────────┬────────┘       │
//! │  │  almond_milk    │                                  │ priced          │
//! │  │  choc. pumps    │                                  ▼                 │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │   OrderQuote    │◄──│  LineItemPrice  │       │
//! │                        │  total_price    │   │  item, price    │       │
//! │                        │  breakdown      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Records use camelCase fields (`drinkType`, `whippedCream`). Drink types and
//! toppings are snake_case (`milk_tea`, `cream_cheese`), sizes are upper case.
//! Every enum parses its wire spelling with [`FromStr`] and rejects anything
//! else with [`ValidationError::NotAllowed`].
//!
//! Deserialization goes through [`crate::decode`]: unknown keys are rejected
//! and bad values fail with the same [`ValidationError`] messages the engine
//! uses, so serde never words a user-facing error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::decode::{self, RawBreakfastItem, RawDrinkOrder, RawLineItem};
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Drink Type
// =============================================================================

/// The kind of drink being ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DrinkType {
    Hot,
    Cold,
    Blended,
    MilkTea,
}

impl DrinkType {
    /// Every drink type on the menu.
    pub const ALL: [DrinkType; 4] = [
        DrinkType::Hot,
        DrinkType::Cold,
        DrinkType::Blended,
        DrinkType::MilkTea,
    ];

    /// Wire spellings, in menu order.
    pub const NAMES: &'static [&'static str] = &["hot", "cold", "blended", "milk_tea"];

    /// Returns the wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DrinkType::Hot => "hot",
            DrinkType::Cold => "cold",
            DrinkType::Blended => "blended",
            DrinkType::MilkTea => "milk_tea",
        }
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrinkType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrinkType::ALL
            .into_iter()
            .find(|drink_type| drink_type.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "drinkType",
                value: s.to_string(),
                allowed: DrinkType::NAMES,
            })
    }
}

impl<'de> Deserialize<'de> for DrinkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decode::wire_choice(deserializer)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Cup size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    S,
    M,
    L,
    XL,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Size; 4] = [Size::S, Size::M, Size::L, Size::XL];

    /// Wire spellings, smallest first.
    pub const NAMES: &'static [&'static str] = &["S", "M", "L", "XL"];

    /// Returns the wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "size",
                value: s.to_string(),
                allowed: Size::NAMES,
            })
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decode::wire_choice(deserializer)
    }
}

// =============================================================================
// Breakfast Item Type
// =============================================================================

/// Food items sold alongside drinks. Food has no size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BreakfastItemType {
    Sandwich,
    Bagel,
}

impl BreakfastItemType {
    pub const ALL: [BreakfastItemType; 2] = [BreakfastItemType::Sandwich, BreakfastItemType::Bagel];

    pub const NAMES: &'static [&'static str] = &["sandwich", "bagel"];

    /// Returns the wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BreakfastItemType::Sandwich => "sandwich",
            BreakfastItemType::Bagel => "bagel",
        }
    }

    /// Toppings this item can carry.
    pub const fn allowed_toppings(&self) -> &'static [BreakfastTopping] {
        match self {
            BreakfastItemType::Sandwich => &[BreakfastTopping::Egg, BreakfastTopping::Turkey],
            BreakfastItemType::Bagel => &[BreakfastTopping::Butter, BreakfastTopping::CreamCheese],
        }
    }

    /// Wire spellings of [`allowed_toppings`](Self::allowed_toppings).
    pub const fn allowed_topping_names(&self) -> &'static [&'static str] {
        match self {
            BreakfastItemType::Sandwich => &["egg", "turkey"],
            BreakfastItemType::Bagel => &["butter", "cream_cheese"],
        }
    }
}

impl fmt::Display for BreakfastItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakfastItemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BreakfastItemType::ALL
            .into_iter()
            .find(|item_type| item_type.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "itemType",
                value: s.to_string(),
                allowed: BreakfastItemType::NAMES,
            })
    }
}

impl<'de> Deserialize<'de> for BreakfastItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decode::wire_choice(deserializer)
    }
}

// =============================================================================
// Breakfast Topping
// =============================================================================

/// A topping for a breakfast item.
///
/// Which toppings fit which item is decided by
/// [`BreakfastItemType::allowed_toppings`], not by this type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BreakfastTopping {
    Egg,
    Turkey,
    Butter,
    CreamCheese,
}

impl BreakfastTopping {
    pub const ALL: [BreakfastTopping; 4] = [
        BreakfastTopping::Egg,
        BreakfastTopping::Turkey,
        BreakfastTopping::Butter,
        BreakfastTopping::CreamCheese,
    ];

    pub const NAMES: &'static [&'static str] = &["egg", "turkey", "butter", "cream_cheese"];

    /// Returns the wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BreakfastTopping::Egg => "egg",
            BreakfastTopping::Turkey => "turkey",
            BreakfastTopping::Butter => "butter",
            BreakfastTopping::CreamCheese => "cream_cheese",
        }
    }
}

impl fmt::Display for BreakfastTopping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakfastTopping {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BreakfastTopping::ALL
            .into_iter()
            .find(|topping| topping.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "topping",
                value: s.to_string(),
                allowed: BreakfastTopping::NAMES,
            })
    }
}

impl<'de> Deserialize<'de> for BreakfastTopping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decode::wire_choice(deserializer)
    }
}

// =============================================================================
// Drink Order
// =============================================================================

/// One drink with all of its options.
///
/// `chocolate_pumps` is a plain integer so that out-of-range requests reach
/// validation instead of being unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DrinkOrder {
    pub drink_type: DrinkType,
    pub size: Size,
    pub whipped_cream: bool,
    pub almond_milk: bool,
    pub chocolate_pumps: i32,
}

impl DrinkOrder {
    /// A plain drink: no whipped cream, regular milk, no chocolate.
    pub fn new(drink_type: DrinkType, size: Size) -> Self {
        DrinkOrder {
            drink_type,
            size,
            whipped_cream: false,
            almond_milk: false,
            chocolate_pumps: 0,
        }
    }

    pub fn with_whipped_cream(mut self, whipped_cream: bool) -> Self {
        self.whipped_cream = whipped_cream;
        self
    }

    pub fn with_almond_milk(mut self, almond_milk: bool) -> Self {
        self.almond_milk = almond_milk;
        self
    }

    pub fn with_chocolate_pumps(mut self, pumps: i32) -> Self {
        self.chocolate_pumps = pumps;
        self
    }
}

impl<'de> Deserialize<'de> for DrinkOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawDrinkOrder::deserialize(deserializer)?
            .into_drink()
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Breakfast Item
// =============================================================================

/// A sandwich or bagel with an optional topping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakfastItem {
    pub item_type: BreakfastItemType,
    pub topping: Option<BreakfastTopping>,
}

impl BreakfastItem {
    /// An item without a topping.
    pub fn plain(item_type: BreakfastItemType) -> Self {
        BreakfastItem {
            item_type,
            topping: None,
        }
    }

    pub fn with_topping(item_type: BreakfastItemType, topping: BreakfastTopping) -> Self {
        BreakfastItem {
            item_type,
            topping: Some(topping),
        }
    }
}

impl<'de> Deserialize<'de> for BreakfastItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawBreakfastItem::deserialize(deserializer)?
            .into_breakfast()
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// One purchasable unit: a drink, optionally with a breakfast item.
///
/// Serialized with the drink fields inline:
/// `{"drinkType":"hot","size":"S",...,"breakfast":{"itemType":"bagel",...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    #[serde(flatten)]
    pub drink: DrinkOrder,
    pub breakfast: Option<BreakfastItem>,
}

impl OrderLineItem {
    /// A line with only a drink.
    pub fn drink(drink: DrinkOrder) -> Self {
        OrderLineItem {
            drink,
            breakfast: None,
        }
    }

    /// A line with a drink and a breakfast item.
    pub fn with_breakfast(drink: DrinkOrder, breakfast: BreakfastItem) -> Self {
        OrderLineItem {
            drink,
            breakfast: Some(breakfast),
        }
    }
}

impl<'de> Deserialize<'de> for OrderLineItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawLineItem::deserialize(deserializer)?
            .into_line_item()
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Pricing Results
// =============================================================================

/// The pre-tax price of one line, paired with the line itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPrice {
    pub item: OrderLineItem,
    pub price: f64,
}

/// A priced order: taxed total plus one breakdown entry per input line.
///
/// `total_price` is the raw floating-point result, never rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuote {
    pub total_price: f64,
    pub breakdown: Vec<LineItemPrice>,
}

impl OrderQuote {
    /// The quote for an order with no lines.
    pub fn empty() -> Self {
        OrderQuote {
            total_price: 0.0,
            breakdown: Vec::new(),
        }
    }

    /// Sum of the line prices before tax.
    pub fn subtotal(&self) -> f64 {
        self.breakdown.iter().fold(0.0, |subtotal, line| subtotal + line.price)
    }

    /// The taxed total rounded to whole cents.
    #[inline]
    pub fn total_money(&self) -> Money {
        Money::from_dollars_rounded(self.total_price)
    }
}

impl Default for OrderQuote {
    fn default() -> Self {
        OrderQuote::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hot", DrinkType::Hot)]
    #[case("cold", DrinkType::Cold)]
    #[case("blended", DrinkType::Blended)]
    #[case("milk_tea", DrinkType::MilkTea)]
    fn test_drink_type_from_str(#[case] input: &str, #[case] expected: DrinkType) {
        assert_eq!(input.parse::<DrinkType>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_drink_type_rejects_unknown() {
        let err = "iced".parse::<DrinkType>().unwrap_err();
        assert_eq!(err.field(), "drinkType");
        assert_eq!(
            err.to_string(),
            "Invalid drinkType 'iced'. Please choose from hot, cold, blended, milk_tea."
        );
    }

    #[rstest]
    #[case("S", Size::S)]
    #[case("M", Size::M)]
    #[case("L", Size::L)]
    #[case("XL", Size::XL)]
    fn test_size_from_str(#[case] input: &str, #[case] expected: Size) {
        assert_eq!(input.parse::<Size>(), Ok(expected));
    }

    #[rstest]
    #[case("XLL")]
    #[case("s")]
    #[case("")]
    fn test_size_rejects_unknown(#[case] input: &str) {
        let err = input.parse::<Size>().unwrap_err();
        assert_eq!(err.field(), "size");
    }

    #[test]
    fn test_topping_rejects_unknown() {
        let err = "jam".parse::<BreakfastTopping>().unwrap_err();
        assert_eq!(err.field(), "topping");
        assert!(err.to_string().contains("cream_cheese"));
    }

    #[test]
    fn test_allowed_topping_names_match_toppings() {
        for item_type in BreakfastItemType::ALL {
            let names: Vec<&str> = item_type
                .allowed_toppings()
                .iter()
                .map(BreakfastTopping::as_str)
                .collect();
            assert_eq!(names, item_type.allowed_topping_names());
        }
    }

    #[test]
    fn test_drink_order_builder() {
        let drink = DrinkOrder::new(DrinkType::Hot, Size::L)
            .with_whipped_cream(true)
            .with_chocolate_pumps(3);
        assert!(drink.whipped_cream);
        assert!(!drink.almond_milk);
        assert_eq!(drink.chocolate_pumps, 3);
    }

    #[test]
    fn test_line_item_wire_format() {
        let item = OrderLineItem::with_breakfast(
            DrinkOrder::new(DrinkType::MilkTea, Size::XL).with_almond_milk(true),
            BreakfastItem::with_topping(BreakfastItemType::Bagel, BreakfastTopping::CreamCheese),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["drinkType"], "milk_tea");
        assert_eq!(json["size"], "XL");
        assert_eq!(json["almondMilk"], true);
        assert_eq!(json["chocolatePumps"], 0);
        assert_eq!(json["breakfast"]["itemType"], "bagel");
        assert_eq!(json["breakfast"]["topping"], "cream_cheese");
    }

    #[test]
    fn test_line_item_defaults_when_deserializing() {
        let item: OrderLineItem =
            serde_json::from_str(r#"{"drinkType":"cold","size":"M","whippedCream":false}"#)
                .unwrap();
        assert_eq!(item, OrderLineItem::drink(DrinkOrder::new(DrinkType::Cold, Size::M)));
    }

    #[test]
    fn test_enum_deserialize_uses_validation_message() {
        let err = serde_json::from_str::<Size>(r#""XXL""#).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Invalid size 'XXL'. Please choose from S, M, L, XL."));

        let err = serde_json::from_str::<DrinkType>("7").unwrap_err();
        assert!(err.to_string().starts_with("Invalid drinkType '7'."));
    }

    #[test]
    fn test_drink_order_rejects_unknown_key() {
        let err = serde_json::from_str::<DrinkOrder>(
            r#"{"drinkType":"hot","size":"S","whippedCream":false,"chocolatePump":2}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("chocolatePump"));
    }

    #[test]
    fn test_breakfast_item_rejects_unknown_key() {
        let err =
            serde_json::from_str::<BreakfastItem>(r#"{"itemType":"bagel","toping":"jam"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("toping"));
    }

    #[test]
    fn test_empty_quote() {
        let quote = OrderQuote::default();
        assert_eq!(quote.total_price, 0.0);
        assert!(quote.breakdown.is_empty());
        assert_eq!(quote.subtotal(), 0.0);
        assert!(quote.total_money().is_zero());
    }
}
