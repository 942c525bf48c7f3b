//! # cafe-core: Pure Pricing Logic for the Café Order System
//!
//! Prices drinks, breakfast items and whole orders. Every function here is
//! pure: no I/O, no global mutable state, same input = same output.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Café Order Flow                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Order entry UI / API (outside this crate)          │   │
//! │  │    pick drink ──► pick options ──► add breakfast ──► checkout   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderLineItem records (JSON)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │validation │  │  tables   │  │  pricing  │  │   │
//! │  │   │DrinkOrder │  │ menu rules│  │PriceTables│  │  Pricing  │  │   │
//! │  │   │ Breakfast │  │ pump range│  │ tax rate  │  │  Engine   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderQuote (raw f64)                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Payment / receipt (caller rounds with Money)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Order records (DrinkOrder, BreakfastItem, OrderLineItem, OrderQuote)
//! - [`decode`] - Order JSON to records, strict about keys and values
//! - [`tables`] - Immutable price tables and tax rate
//! - [`pricing`] - The pricing engine
//! - [`validation`] - Menu rules checked before pricing
//! - [`money`] - Integer cents for callers that need rounding
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::{
//!     BreakfastItem, BreakfastItemType, BreakfastTopping, DrinkOrder, DrinkType, OrderLineItem,
//!     PricingEngine, Size,
//! };
//!
//! let engine = PricingEngine::standard();
//!
//! let order = vec![
//!     OrderLineItem::drink(DrinkOrder::new(DrinkType::Cold, Size::M).with_chocolate_pumps(2)),
//!     OrderLineItem::with_breakfast(
//!         DrinkOrder::new(DrinkType::Cold, Size::M).with_almond_milk(true),
//!         BreakfastItem::with_topping(BreakfastItemType::Sandwich, BreakfastTopping::Egg),
//!     ),
//! ];
//!
//! let quote = engine.price_order(&order).unwrap();
//! assert_eq!(quote.breakdown[0].price, 2.5);
//! assert_eq!(quote.breakdown[1].price, 7.0);
//! assert_eq!(quote.total_money().to_string(), "$10.19");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod decode;
pub mod error;
pub mod money;
pub mod pricing;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use decode::parse_order;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::PricingEngine;
pub use tables::PriceTables;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to order totals (7.25%).
pub const TAX_RATE: f64 = 0.0725;

/// Most chocolate pumps a drink can take.
pub const MAX_CHOCOLATE_PUMPS: usize = 6;

/// One chocolate price per pump count, 0 through [`MAX_CHOCOLATE_PUMPS`].
pub const CHOCOLATE_TABLE_LEN: usize = MAX_CHOCOLATE_PUMPS + 1;
