//! End-to-end pricing scenarios against the standard tables.

use std::sync::Once;

use cafe_core::{
    parse_order, BreakfastItem, BreakfastItemType, BreakfastTopping, CoreError, DrinkOrder,
    DrinkType, OrderLineItem, OrderQuote, PriceTables, PricingEngine, Size,
};
use proptest::prelude::*;
use proptest::sample::select;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

fn engine() -> PricingEngine<'static> {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
    PricingEngine::standard()
}

// =============================================================================
// Worked Examples
// =============================================================================

#[test]
fn basic_menu_prices() {
    let engine = engine();
    assert_eq!(engine.price_drink_basic(DrinkType::Hot, Size::S, false).unwrap(), 2.0);
    assert_eq!(engine.price_drink_basic(DrinkType::Cold, Size::M, false).unwrap(), 2.5);
    assert_eq!(engine.price_drink_basic(DrinkType::Blended, Size::L, true).unwrap(), 4.5);
}

#[test]
fn basic_menu_has_no_large_hot_drinks() {
    let err = engine()
        .price_drink_basic(DrinkType::Hot, Size::L, false)
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
}

#[test]
fn later_menu_pours_every_size() {
    let engine = engine();
    for drink_type in DrinkType::ALL {
        for size in Size::ALL {
            assert!(engine
                .price_drink_with_milk(drink_type, size, false, false)
                .is_ok());
        }
    }
}

#[test]
fn hot_large_with_whipped_cream_and_three_pumps() {
    let price = engine()
        .price_drink_with_chocolate(DrinkType::Hot, Size::L, true, false, 3)
        .unwrap();
    assert_eq!(price, 4.0);
}

#[test]
fn breakfast_prices() {
    let engine = engine();
    assert_eq!(
        engine.price_breakfast_item(BreakfastItemType::Sandwich, None).unwrap(),
        3.0
    );
    assert_eq!(
        engine
            .price_breakfast_item(BreakfastItemType::Sandwich, Some(BreakfastTopping::Egg))
            .unwrap(),
        4.0
    );
    assert_eq!(
        engine
            .price_breakfast_item(BreakfastItemType::Bagel, Some(BreakfastTopping::Butter))
            .unwrap(),
        3.5
    );
}

#[test]
fn jam_is_not_a_bagel_topping() {
    let err = "jam".parse::<BreakfastTopping>().unwrap_err();
    assert_eq!(err.field(), "topping");

    let json = r#"[{"drinkType":"hot","size":"S","whippedCream":false,
                    "breakfast":{"itemType":"bagel","topping":"jam"}}]"#;
    let expected = "Invalid topping 'jam'. Please choose from butter, cream_cheese.";

    let err = parse_order(json).unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
    assert_eq!(err.to_string(), expected);

    let err = serde_json::from_str::<Vec<OrderLineItem>>(json).unwrap_err();
    assert!(err.to_string().starts_with(expected));
}

#[test]
fn misspelled_keys_are_rejected() {
    let json = r#"[{"drinkType":"hot","size":"S","whippedCream":false,"chocolatePump":9,
                    "breakfast":{"itemType":"bagel","toping":"jam"}}]"#;
    let err = parse_order(json).unwrap_err();
    assert!(matches!(err, CoreError::Json(_)));
    assert!(err.to_string().contains("unknown field `chocolatePump`"));
    assert!(serde_json::from_str::<Vec<OrderLineItem>>(json).is_err());

    let json = r#"[{"drinkType":"hot","size":"S","whippedCream":false,
                    "breakfast":{"itemType":"bagel","toping":"jam"}}]"#;
    let err = parse_order(json).unwrap_err();
    assert!(err.to_string().contains("unknown field `toping`"));
}

#[test]
fn fractional_pumps_are_invalid_argument() {
    let json = r#"[{"drinkType":"hot","size":"S","whippedCream":false,"chocolatePumps":2.5}]"#;
    let err = parse_order(json).unwrap_err();
    assert_eq!(
        err.as_validation().map(|err| err.field()),
        Some("chocolatePumps")
    );
    assert_eq!(err.to_string(), "Invalid chocolatePumps 2.5. Expected a whole number.");
}

#[test]
fn parsed_pumps_out_of_range_fail_when_priced() {
    let items = parse_order(
        r#"[{"drinkType":"hot","size":"S","whippedCream":false,"chocolatePumps":9}]"#,
    )
    .unwrap();
    let err = engine().price_order(&items).unwrap_err();
    assert_eq!(err.to_string(), "Invalid chocolatePumps 9. Please choose between 0 and 6.");
}

#[test]
fn empty_order() {
    let quote = engine().price_order(&[]).unwrap();
    assert_eq!(quote.total_price, 0.0);
    assert!(quote.breakdown.is_empty());
}

#[test]
fn single_item_order() {
    let items = [OrderLineItem::drink(
        DrinkOrder::new(DrinkType::Hot, Size::S)
            .with_whipped_cream(true)
            .with_chocolate_pumps(1),
    )];

    let quote = engine().price_order(&items).unwrap();
    assert_eq!(quote.breakdown.len(), 1);
    assert_eq!(quote.breakdown[0].item, items[0]);
    assert_eq!(quote.breakdown[0].price, 2.5);
    assert_eq!(quote.total_price, 2.68125);
}

#[test]
fn multiple_item_order() {
    let items = [
        OrderLineItem::drink(DrinkOrder::new(DrinkType::Cold, Size::M).with_chocolate_pumps(2)),
        OrderLineItem::drink(
            DrinkOrder::new(DrinkType::Blended, Size::XL)
                .with_whipped_cream(true)
                .with_almond_milk(true)
                .with_chocolate_pumps(4),
        ),
        OrderLineItem::with_breakfast(
            DrinkOrder::new(DrinkType::Cold, Size::M).with_almond_milk(true),
            BreakfastItem::with_topping(BreakfastItemType::Sandwich, BreakfastTopping::Egg),
        ),
    ];

    let quote = engine().price_order(&items).unwrap();
    let prices: Vec<f64> = quote.breakdown.iter().map(|line| line.price).collect();
    assert_eq!(prices, [2.5, 6.5, 7.0]);
    assert_eq!(quote.subtotal(), 16.0);
    assert_eq!(quote.total_price, 17.16);
    assert_eq!(quote.total_money().cents(), 1716);
}

#[test]
fn order_from_json() {
    let json = r#"[
        {"drinkType":"hot","size":"S","whippedCream":true,"chocolatePumps":1},
        {"drinkType":"milk_tea","size":"XL","whippedCream":false,"almondMilk":true,
         "breakfast":{"itemType":"bagel","topping":"cream_cheese"}}
    ]"#;
    let items = parse_order(json).unwrap();
    assert_eq!(items, serde_json::from_str::<Vec<OrderLineItem>>(json).unwrap());

    let quote = engine().price_order(&items).unwrap();
    assert_eq!(quote.breakdown[0].price, 2.5);
    assert_eq!(quote.breakdown[1].price, 7.75);

    let value = serde_json::to_value(&quote).unwrap();
    assert_eq!(value["breakdown"][1]["item"]["drinkType"], "milk_tea");
    assert_eq!(value["breakdown"][1]["price"], 7.75);
    assert!(value["totalPrice"].is_f64());

    let round_trip: OrderQuote = serde_json::from_value(value).unwrap();
    assert_eq!(round_trip, quote);
}

#[test]
fn invalid_item_aborts_whole_order() {
    let items = [
        OrderLineItem::drink(DrinkOrder::new(DrinkType::Hot, Size::S)),
        OrderLineItem::with_breakfast(
            DrinkOrder::new(DrinkType::Hot, Size::S),
            BreakfastItem::with_topping(BreakfastItemType::Bagel, BreakfastTopping::Turkey),
        ),
    ];

    let err = engine().price_order(&items).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid topping 'turkey'. Please choose from butter, cream_cheese."
    );
}

#[test]
fn pricing_from_many_threads() {
    let engine = engine();
    let item = OrderLineItem::drink(
        DrinkOrder::new(DrinkType::Blended, Size::XL)
            .with_whipped_cream(true)
            .with_chocolate_pumps(6),
    );

    let item = &item;

    let totals: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(move |_| {
                scope.spawn(move || engine.price_order(std::slice::from_ref(item)).unwrap())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().total_price)
            .collect()
    });

    assert!(totals.windows(2).all(|pair| pair[0] == pair[1]));
}

// =============================================================================
// Properties
// =============================================================================

fn drink_order() -> impl Strategy<Value = DrinkOrder> {
    (
        select(DrinkType::ALL.to_vec()),
        select(Size::ALL.to_vec()),
        any::<bool>(),
        any::<bool>(),
        0..=6i32,
    )
        .prop_map(|(drink_type, size, whipped_cream, almond_milk, pumps)| {
            DrinkOrder::new(drink_type, size)
                .with_whipped_cream(whipped_cream)
                .with_almond_milk(almond_milk)
                .with_chocolate_pumps(pumps)
        })
}

fn breakfast_item() -> impl Strategy<Value = BreakfastItem> {
    select(BreakfastItemType::ALL.to_vec()).prop_flat_map(|item_type| {
        let toppings: Vec<Option<BreakfastTopping>> = std::iter::once(None)
            .chain(item_type.allowed_toppings().iter().copied().map(Some))
            .collect();
        select(toppings).prop_map(move |topping| BreakfastItem { item_type, topping })
    })
}

fn line_item() -> impl Strategy<Value = OrderLineItem> {
    (drink_order(), proptest::option::of(breakfast_item()))
        .prop_map(|(drink, breakfast)| OrderLineItem { drink, breakfast })
}

proptest! {
    #[test]
    fn drink_price_matches_formula(drink in drink_order()) {
        let tables = PriceTables::standard();
        let mut expected = tables.base_price(drink.drink_type).unwrap()
            + tables.size_surcharge(drink.size).unwrap();
        if drink.whipped_cream {
            expected += 0.5;
        }
        if drink.almond_milk {
            expected += 0.5;
        }
        expected += [0.0, 0.0, 0.0, 0.5, 1.0, 1.5, 2.0][drink.chocolate_pumps as usize];

        prop_assert_eq!(engine().price_drink(&drink).unwrap(), expected);
    }

    #[test]
    fn out_of_range_pumps_always_rejected(
        drink in drink_order(),
        pumps in prop_oneof![i32::MIN..0, 7..=i32::MAX],
    ) {
        let drink = drink.with_chocolate_pumps(pumps);
        let err = engine().price_drink(&drink).unwrap_err();
        prop_assert_eq!(err.as_validation().map(|err| err.field()), Some("chocolatePumps"));
    }

    #[test]
    fn pricing_is_idempotent(items in proptest::collection::vec(line_item(), 0..8)) {
        let engine = engine();
        let first = engine.price_order(&items).unwrap();
        let second = engine.price_order(&items).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn breakdown_preserves_order(items in proptest::collection::vec(line_item(), 0..8)) {
        let engine = engine();
        let quote = engine.price_order(&items).unwrap();

        prop_assert_eq!(quote.breakdown.len(), items.len());
        for (line, item) in quote.breakdown.iter().zip(&items) {
            prop_assert_eq!(&line.item, item);
            prop_assert_eq!(line.price, engine.price_line_item(item).unwrap());
        }
        prop_assert_eq!(quote.total_price, quote.subtotal() * (1.0 + 0.0725));
    }
}
