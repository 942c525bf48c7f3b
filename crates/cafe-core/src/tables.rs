//! # Price Tables
//!
//! Every number the engine charges lives in one immutable [`PriceTables`]
//! value. The engine borrows it and never mutates it.
//!
//! ## Standard Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Drink base            Size surcharge        Add-ons                    │
//! │  ──────────            ──────────────        ───────                    │
//! │  hot       2.00        S    0.00             whipped cream   0.50       │
//! │  cold      2.00        M    0.50             almond milk     0.50       │
//! │  blended   3.00        L    1.00                                        │
//! │  milk_tea  2.25        XL   1.50             Tax rate        7.25%      │
//! │                                                                         │
//! │  Chocolate pumps (first 2 free, 0.50 per extra pump, max 6)             │
//! │  pumps   0    1    2    3     4     5     6                             │
//! │  price   0    0    0    0.50  1.00  1.50  2.00                          │
//! │                                                                         │
//! │  Breakfast (totals, not deltas)                                         │
//! │  sandwich: none 3.00   egg 4.00      turkey 4.00                        │
//! │  bagel:    none 3.00   butter 3.50   cream_cheese 3.50                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Custom Tables
//! Callers may supply their own tables as JSON (same shape as
//! [`PriceTables::to_json`]). Loaded tables are validated once so that every
//! lookup the engine makes has an entry. This holds for serde too:
//! deserializing a `PriceTables` runs [`PriceTables::validate`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::types::{BreakfastItemType, BreakfastTopping, DrinkType, Size};
use crate::{CHOCOLATE_TABLE_LEN, TAX_RATE};

/// Breakfast table key used when no topping is chosen.
pub const NO_TOPPING: &str = "none";

static STANDARD: LazyLock<PriceTables> = LazyLock::new(PriceTables::build_standard);

// =============================================================================
// Price Tables
// =============================================================================

/// All prices and the tax rate, as one immutable configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTables {
    drink_base_price: BTreeMap<DrinkType, f64>,
    size_surcharge: BTreeMap<Size, f64>,
    whipped_cream: f64,
    almond_milk: f64,
    /// Indexed by pump count.
    chocolate_pumps: [f64; CHOCOLATE_TABLE_LEN],
    /// Item type → topping name (or `"none"`) → total item price.
    breakfast: BTreeMap<BreakfastItemType, BTreeMap<String, f64>>,
    tax_rate: f64,
}

impl PriceTables {
    /// The café's standard tables, built once per process.
    pub fn standard() -> &'static PriceTables {
        &STANDARD
    }

    fn build_standard() -> PriceTables {
        let drink_base_price = BTreeMap::from([
            (DrinkType::Hot, 2.0),
            (DrinkType::Cold, 2.0),
            (DrinkType::Blended, 3.0),
            (DrinkType::MilkTea, 2.25),
        ]);

        let size_surcharge = BTreeMap::from([
            (Size::S, 0.0),
            (Size::M, 0.5),
            (Size::L, 1.0),
            (Size::XL, 1.5),
        ]);

        let sandwich = BTreeMap::from([
            (NO_TOPPING.to_string(), 3.0),
            (BreakfastTopping::Egg.to_string(), 4.0),
            (BreakfastTopping::Turkey.to_string(), 4.0),
        ]);
        let bagel = BTreeMap::from([
            (NO_TOPPING.to_string(), 3.0),
            (BreakfastTopping::Butter.to_string(), 3.5),
            (BreakfastTopping::CreamCheese.to_string(), 3.5),
        ]);

        PriceTables {
            drink_base_price,
            size_surcharge,
            whipped_cream: 0.5,
            almond_milk: 0.5,
            chocolate_pumps: [0.0, 0.0, 0.0, 0.5, 1.0, 1.5, 2.0],
            breakfast: BTreeMap::from([
                (BreakfastItemType::Sandwich, sandwich),
                (BreakfastItemType::Bagel, bagel),
            ]),
            tax_rate: TAX_RATE,
        }
    }

    /// Parses and validates tables supplied by the caller.
    ///
    /// ## Example
    /// ```rust
    /// use cafe_core::PriceTables;
    ///
    /// let json = PriceTables::standard().to_json().unwrap();
    /// let tables = PriceTables::from_json(&json).unwrap();
    /// assert_eq!(&tables, PriceTables::standard());
    ///
    /// assert!(PriceTables::from_json("{}").is_err());
    /// ```
    pub fn from_json(json: &str) -> CoreResult<PriceTables> {
        let tables = serde_json::from_str::<UncheckedTables>(json)?.into_tables();
        tables.validate().inspect_err(|err| {
            warn!(error = %err, "Rejected custom price tables");
        })?;

        info!(tax_rate = tables.tax_rate, "Loaded custom price tables");
        Ok(tables)
    }

    /// Serializes the tables as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the tables are complete and sane.
    ///
    /// ## Rules
    /// - An entry for every drink type and size
    /// - An entry for every breakfast item with no topping and with each of
    ///   its allowed toppings
    /// - Every price finite and non-negative
    /// - Tax rate finite and between 0 and 1
    pub fn validate(&self) -> CoreResult<()> {
        for drink_type in DrinkType::ALL {
            check_price(
                &format!("drink base price for {drink_type}"),
                self.drink_base_price.get(&drink_type).copied(),
            )?;
        }

        for size in Size::ALL {
            check_price(
                &format!("size surcharge for {size}"),
                self.size_surcharge.get(&size).copied(),
            )?;
        }

        check_price("whipped cream surcharge", Some(self.whipped_cream))?;
        check_price("almond milk surcharge", Some(self.almond_milk))?;

        for (pumps, price) in self.chocolate_pumps.iter().enumerate() {
            check_price(&format!("chocolate price for {pumps} pumps"), Some(*price))?;
        }

        for item_type in BreakfastItemType::ALL {
            let prices = self.breakfast.get(&item_type);
            let keys = std::iter::once(NO_TOPPING)
                .chain(item_type.allowed_topping_names().iter().copied());
            for key in keys {
                check_price(
                    &format!("{item_type} price with topping {key}"),
                    prices.and_then(|prices| prices.get(key)).copied(),
                )?;
            }
        }

        if !self.tax_rate.is_finite() || !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(CoreError::InvalidTables(format!(
                "tax rate must be between 0 and 1, got {}",
                self.tax_rate
            )));
        }

        Ok(())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn base_price(&self, drink_type: DrinkType) -> CoreResult<f64> {
        self.drink_base_price
            .get(&drink_type)
            .copied()
            .ok_or_else(|| missing("drink base price", drink_type))
    }

    pub fn size_surcharge(&self, size: Size) -> CoreResult<f64> {
        self.size_surcharge
            .get(&size)
            .copied()
            .ok_or_else(|| missing("size surcharge", size))
    }

    #[inline]
    pub fn whipped_cream_surcharge(&self) -> f64 {
        self.whipped_cream
    }

    #[inline]
    pub fn almond_milk_surcharge(&self) -> f64 {
        self.almond_milk
    }

    /// Chocolate surcharge for an already validated pump count.
    pub fn chocolate_surcharge(&self, pumps: usize) -> CoreResult<f64> {
        self.chocolate_pumps
            .get(pumps)
            .copied()
            .ok_or_else(|| missing("chocolate", pumps))
    }

    /// Total price of a breakfast item with the given topping.
    pub fn breakfast_price(
        &self,
        item_type: BreakfastItemType,
        topping: Option<BreakfastTopping>,
    ) -> CoreResult<f64> {
        let key = topping.map_or(NO_TOPPING, |topping| topping.as_str());
        self.breakfast
            .get(&item_type)
            .and_then(|prices| prices.get(key))
            .copied()
            .ok_or_else(|| missing("breakfast", format!("{item_type}/{key}")))
    }

    #[inline]
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }
}

impl Default for PriceTables {
    fn default() -> Self {
        PriceTables::standard().clone()
    }
}

impl<'de> Deserialize<'de> for PriceTables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tables = UncheckedTables::deserialize(deserializer)?.into_tables();
        tables.validate().map_err(serde::de::Error::custom)?;
        Ok(tables)
    }
}

/// Tables as read from JSON, before [`PriceTables::validate`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UncheckedTables {
    drink_base_price: BTreeMap<DrinkType, f64>,
    size_surcharge: BTreeMap<Size, f64>,
    whipped_cream: f64,
    almond_milk: f64,
    chocolate_pumps: [f64; CHOCOLATE_TABLE_LEN],
    breakfast: BTreeMap<BreakfastItemType, BTreeMap<String, f64>>,
    tax_rate: f64,
}

impl UncheckedTables {
    fn into_tables(self) -> PriceTables {
        PriceTables {
            drink_base_price: self.drink_base_price,
            size_surcharge: self.size_surcharge,
            whipped_cream: self.whipped_cream,
            almond_milk: self.almond_milk,
            chocolate_pumps: self.chocolate_pumps,
            breakfast: self.breakfast,
            tax_rate: self.tax_rate,
        }
    }
}

fn check_price(what: &str, price: Option<f64>) -> CoreResult<()> {
    match price {
        None => Err(CoreError::InvalidTables(format!("missing {what}"))),
        Some(price) if !price.is_finite() || price < 0.0 => Err(CoreError::InvalidTables(
            format!("{what} must be a non-negative number, got {price}"),
        )),
        Some(_) => Ok(()),
    }
}

fn missing(table: &'static str, key: impl ToString) -> CoreError {
    CoreError::MissingPrice {
        table,
        key: key.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
