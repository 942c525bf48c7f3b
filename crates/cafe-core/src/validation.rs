//! # Validation Module
//!
//! Option checks shared by the pricing operations.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fail-Fast Order                                    │
//! │                                                                         │
//! │  1. drink type          validate_basic_drink_type (basic only)         │
//! │  2. size                validate_basic_size       (basic only)         │
//! │  3. whipped cream       bool, enforced by the type system              │
//! │  4. almond milk         bool, enforced by the type system              │
//! │  5. size availability   validate_size_availability (basic only)        │
//! │  6. chocolate pumps     validate_chocolate_pumps                       │
//! │  7. breakfast topping   validate_topping                               │
//! │                                                                         │
//! │  The first failure is returned. Nothing is priced until all pass.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Later drink operations accept every [`DrinkType`] and [`Size`], so only the
//! basic operation calls the first two validators and the availability rule.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{BreakfastItemType, BreakfastTopping, DrinkType, Size};
use crate::MAX_CHOCOLATE_PUMPS;

// =============================================================================
// Basic Menu
// =============================================================================

/// Drink types sold by the basic menu.
pub const BASIC_DRINK_TYPES: &[DrinkType] = &[DrinkType::Hot, DrinkType::Cold, DrinkType::Blended];

/// Sizes sold by the basic menu.
pub const BASIC_SIZES: &[Size] = &[Size::S, Size::M, Size::L];

/// Drink types that come in L on the basic menu.
pub const LARGE_DRINK_TYPES: &[DrinkType] = &[DrinkType::Cold, DrinkType::Blended];

const BASIC_DRINK_TYPE_NAMES: &[&str] = &["hot", "cold", "blended"];
const BASIC_SIZE_NAMES: &[&str] = &["S", "M", "L"];
const LARGE_DRINK_TYPE_NAMES: &[&str] = &["cold", "blended"];

/// Checks that a drink type is on the basic menu.
///
/// ## Example
/// ```rust
/// use cafe_core::validation::validate_basic_drink_type;
/// use cafe_core::DrinkType;
///
/// assert!(validate_basic_drink_type(DrinkType::Blended).is_ok());
/// assert!(validate_basic_drink_type(DrinkType::MilkTea).is_err());
/// ```
pub fn validate_basic_drink_type(drink_type: DrinkType) -> ValidationResult<()> {
    if !BASIC_DRINK_TYPES.contains(&drink_type) {
        return Err(ValidationError::NotAllowed {
            field: "drinkType",
            value: drink_type.to_string(),
            allowed: BASIC_DRINK_TYPE_NAMES,
        });
    }

    Ok(())
}

/// Checks that a size is on the basic menu (no XL).
pub fn validate_basic_size(size: Size) -> ValidationResult<()> {
    if !BASIC_SIZES.contains(&size) {
        return Err(ValidationError::NotAllowed {
            field: "size",
            value: size.to_string(),
            allowed: BASIC_SIZE_NAMES,
        });
    }

    Ok(())
}

/// Checks the basic menu's size availability rule: L is only poured for
/// cold and blended drinks.
///
/// ## Example
/// ```rust
/// use cafe_core::validation::validate_size_availability;
/// use cafe_core::{DrinkType, Size};
///
/// assert!(validate_size_availability(DrinkType::Cold, Size::L).is_ok());
/// assert!(validate_size_availability(DrinkType::Hot, Size::M).is_ok());
///
/// let err = validate_size_availability(DrinkType::Hot, Size::L).unwrap_err();
/// assert_eq!(err.to_string(), "L size is only available for cold and blended drinks.");
/// ```
pub fn validate_size_availability(drink_type: DrinkType, size: Size) -> ValidationResult<()> {
    if size == Size::L && !LARGE_DRINK_TYPES.contains(&drink_type) {
        return Err(ValidationError::SizeUnavailable {
            size: size.as_str(),
            drink_type: drink_type.as_str(),
            allowed: LARGE_DRINK_TYPE_NAMES,
        });
    }

    Ok(())
}

// =============================================================================
// Add-ons
// =============================================================================

/// Checks a chocolate pump count and returns it as a table index.
///
/// ## Rules
/// - 0 to [`MAX_CHOCOLATE_PUMPS`] (6) inclusive
/// - Any drink type may take chocolate
pub fn validate_chocolate_pumps(pumps: i32) -> ValidationResult<usize> {
    usize::try_from(pumps)
        .ok()
        .filter(|&index| index <= MAX_CHOCOLATE_PUMPS)
        .ok_or(ValidationError::OutOfRange {
            field: "chocolatePumps",
            value: i64::from(pumps),
            min: 0,
            max: MAX_CHOCOLATE_PUMPS as i64,
        })
}

/// Checks that a topping (if any) belongs to the breakfast item.
///
/// ## Rules
/// - No topping is always fine
/// - Sandwich: egg or turkey
/// - Bagel: butter or cream_cheese
pub fn validate_topping(
    item_type: BreakfastItemType,
    topping: Option<BreakfastTopping>,
) -> ValidationResult<()> {
    let Some(topping) = topping else {
        return Ok(());
    };

    if !item_type.allowed_toppings().contains(&topping) {
        return Err(ValidationError::NotAllowed {
            field: "topping",
            value: topping.to_string(),
            allowed: item_type.allowed_topping_names(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
