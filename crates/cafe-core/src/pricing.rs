//! # Pricing Engine
//!
//! Turns order records into prices using a borrowed [`PriceTables`].
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PricingEngine Operations                           │
//! │                                                                         │
//! │  price_drink_basic ──────────► hot/cold/blended, S/M/L, L not for hot   │
//! │         │                                                               │
//! │         ▼ (any drink type, any size)                                    │
//! │  price_drink_with_milk ──────► + almond milk                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  price_drink_with_chocolate ─► + chocolate pumps (0-6)                  │
//! │         │                                                               │
//! │         │        price_breakfast_item ──► sandwich / bagel + topping    │
//! │         │                 │                                             │
//! │         ▼                 ▼                                             │
//! │  price_line_item ────────► drink + optional breakfast (pre-tax)         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  price_order ────────────► Σ lines × (1 + tax), breakdown in order     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Arithmetic
//! Prices are raw `f64` sums and products. Nothing is rounded here; use
//! [`Money`](crate::money::Money) at the edge when cents are needed.
//!
//! ## Usage
//! ```rust
//! use cafe_core::{DrinkOrder, DrinkType, OrderLineItem, PricingEngine, Size};
//!
//! let engine = PricingEngine::standard();
//!
//! let price = engine.price_drink_basic(DrinkType::Blended, Size::L, true).unwrap();
//! assert_eq!(price, 4.5);
//!
//! let order = [OrderLineItem::drink(
//!     DrinkOrder::new(DrinkType::Hot, Size::S)
//!         .with_whipped_cream(true)
//!         .with_chocolate_pumps(1),
//! )];
//! let quote = engine.price_order(&order).unwrap();
//! assert_eq!(quote.breakdown[0].price, 2.5);
//! assert_eq!(quote.total_price, 2.68125);
//! ```

use tracing::debug;

use crate::error::CoreResult;
use crate::tables::PriceTables;
use crate::types::{
    BreakfastItem, BreakfastItemType, BreakfastTopping, DrinkOrder, DrinkType, LineItemPrice,
    OrderLineItem, OrderQuote, Size,
};
use crate::validation::{
    validate_basic_drink_type, validate_basic_size, validate_chocolate_pumps,
    validate_size_availability, validate_topping,
};

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless pricing over a borrowed set of price tables.
///
/// `Copy`, `Send` and `Sync`: share it freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'t> {
    tables: &'t PriceTables,
}

impl PricingEngine<'static> {
    /// An engine over the standard tables.
    pub fn standard() -> Self {
        PricingEngine::new(PriceTables::standard())
    }
}

impl<'t> PricingEngine<'t> {
    /// An engine over caller-supplied tables.
    pub const fn new(tables: &'t PriceTables) -> Self {
        PricingEngine { tables }
    }

    // =========================================================================
    // Drinks
    // =========================================================================

    /// Prices a drink from the basic menu.
    ///
    /// ## Rules
    /// - Drink type: hot, cold or blended
    /// - Size: S, M or L
    /// - L only for cold and blended drinks
    ///
    /// Price = base + size surcharge + whipped cream.
    pub fn price_drink_basic(
        &self,
        drink_type: DrinkType,
        size: Size,
        whipped_cream: bool,
    ) -> CoreResult<f64> {
        validate_basic_drink_type(drink_type)?;
        validate_basic_size(size)?;
        validate_size_availability(drink_type, size)?;

        self.drink_price(drink_type, size, whipped_cream, false)
    }

    /// Prices any drink type in any size, with optional almond milk.
    ///
    /// Every size is poured for every drink type here; the basic menu's
    /// L restriction does not apply.
    ///
    /// Price = base + size surcharge + whipped cream + almond milk.
    pub fn price_drink_with_milk(
        &self,
        drink_type: DrinkType,
        size: Size,
        whipped_cream: bool,
        almond_milk: bool,
    ) -> CoreResult<f64> {
        self.drink_price(drink_type, size, whipped_cream, almond_milk)
    }

    /// [`price_drink_with_milk`](Self::price_drink_with_milk) plus chocolate.
    ///
    /// ## Chocolate
    /// 0 to 6 pumps. The first two are free, each further pump costs 0.50.
    ///
    /// ## Example
    /// ```rust
    /// use cafe_core::{DrinkType, PricingEngine, Size};
    ///
    /// let engine = PricingEngine::standard();
    /// // 2 (hot) + 1 (L) + 0.5 (whipped) + 0.5 (3rd pump)
    /// assert_eq!(
    ///     engine.price_drink_with_chocolate(DrinkType::Hot, Size::L, true, false, 3).unwrap(),
    ///     4.0
    /// );
    /// assert!(engine.price_drink_with_chocolate(DrinkType::Hot, Size::M, false, false, 7).is_err());
    /// ```
    pub fn price_drink_with_chocolate(
        &self,
        drink_type: DrinkType,
        size: Size,
        whipped_cream: bool,
        almond_milk: bool,
        chocolate_pumps: i32,
    ) -> CoreResult<f64> {
        let pumps = validate_chocolate_pumps(chocolate_pumps)?;

        let price = self.drink_price(drink_type, size, whipped_cream, almond_milk)?;
        Ok(price + self.tables.chocolate_surcharge(pumps)?)
    }

    /// Prices a [`DrinkOrder`] with every option it carries.
    pub fn price_drink(&self, drink: &DrinkOrder) -> CoreResult<f64> {
        self.price_drink_with_chocolate(
            drink.drink_type,
            drink.size,
            drink.whipped_cream,
            drink.almond_milk,
            drink.chocolate_pumps,
        )
    }

    fn drink_price(
        &self,
        drink_type: DrinkType,
        size: Size,
        whipped_cream: bool,
        almond_milk: bool,
    ) -> CoreResult<f64> {
        let mut price = self.tables.base_price(drink_type)?;
        price += self.tables.size_surcharge(size)?;
        if whipped_cream {
            price += self.tables.whipped_cream_surcharge();
        }
        if almond_milk {
            price += self.tables.almond_milk_surcharge();
        }
        Ok(price)
    }

    // =========================================================================
    // Breakfast
    // =========================================================================

    /// Prices a sandwich or bagel.
    ///
    /// ## Example
    /// ```rust
    /// use cafe_core::{BreakfastItemType, BreakfastTopping, PricingEngine};
    ///
    /// let engine = PricingEngine::standard();
    /// assert_eq!(engine.price_breakfast_item(BreakfastItemType::Sandwich, None).unwrap(), 3.0);
    /// assert_eq!(
    ///     engine
    ///         .price_breakfast_item(BreakfastItemType::Bagel, Some(BreakfastTopping::Butter))
    ///         .unwrap(),
    ///     3.5
    /// );
    /// // Egg goes on sandwiches, not bagels
    /// assert!(engine
    ///     .price_breakfast_item(BreakfastItemType::Bagel, Some(BreakfastTopping::Egg))
    ///     .is_err());
    /// ```
    pub fn price_breakfast_item(
        &self,
        item_type: BreakfastItemType,
        topping: Option<BreakfastTopping>,
    ) -> CoreResult<f64> {
        validate_topping(item_type, topping)?;
        self.tables.breakfast_price(item_type, topping)
    }

    /// Prices a [`BreakfastItem`].
    pub fn price_breakfast(&self, item: &BreakfastItem) -> CoreResult<f64> {
        self.price_breakfast_item(item.item_type, item.topping)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Pre-tax price of one line: the drink plus its breakfast item, if any.
    pub fn price_line_item(&self, item: &OrderLineItem) -> CoreResult<f64> {
        let mut price = self.price_drink(&item.drink)?;
        if let Some(breakfast) = &item.breakfast {
            price += self.price_breakfast(breakfast)?;
        }
        Ok(price)
    }

    /// Prices a whole order.
    ///
    /// ## Behavior
    /// - `total_price` = sum of line prices × (1 + tax rate), unrounded
    /// - `breakdown` has one entry per input line, in input order
    /// - An empty order yields `{ total_price: 0, breakdown: [] }`
    /// - The first invalid line aborts the whole order with its error
    pub fn price_order(&self, items: &[OrderLineItem]) -> CoreResult<OrderQuote> {
        let mut subtotal = 0.0;
        let mut breakdown = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let price = self.price_line_item(item).inspect_err(|err| {
                debug!(index, error = %err, "Order line rejected");
            })?;
            subtotal += price;
            breakdown.push(LineItemPrice {
                item: item.clone(),
                price,
            });
        }

        let total_price = subtotal * (1.0 + self.tables.tax_rate());
        debug!(lines = items.len(), subtotal, total_price, "Priced order");

        Ok(OrderQuote {
            total_price,
            breakdown,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
