//! Integration tests for configuring products and collecting them in a cart.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use quickgrub_core::ProductId;
use quickgrub_integration_tests::{choice, dollars, menu, product};
use quickgrub_storefront::cart::CartStore;
use quickgrub_storefront::configurator::{ConfiguratorError, ItemConfigurator};

// =============================================================================
// Configurator -> Cart
// =============================================================================

#[test]
fn test_large_burger_with_cheese_merges_into_one_entry() {
    let catalog = menu();
    let burger = product(&catalog, "classic-burger");
    let mut cart = CartStore::new();

    let mut dialog = ItemConfigurator::new(burger);
    dialog.select_single("Size", &choice("large")).unwrap();
    dialog.toggle_multi("Add-ons", &choice("cheese")).unwrap();
    assert_eq!(dialog.unit_price(), dollars(1350));

    dialog.increase_quantity();
    assert_eq!(dialog.total_price(), dollars(2700));
    cart.add_item(dialog.validate().unwrap().finalize());

    // Same configuration picked again in a fresh dialog
    let mut again = ItemConfigurator::new(burger);
    again.toggle_multi("Add-ons", &choice("cheese")).unwrap();
    again.select_single("Size", &choice("large")).unwrap();
    cart.add_item(again.validate().unwrap().finalize());

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), dollars(4050));
}

#[test]
fn test_different_configurations_stay_separate() {
    let catalog = menu();
    let burger = product(&catalog, "classic-burger");
    let mut cart = CartStore::new();

    let mut plain = ItemConfigurator::new(burger);
    plain.select_single("Size", &choice("regular")).unwrap();
    cart.add_item(plain.validate().unwrap().finalize());

    let mut loaded = ItemConfigurator::new(burger);
    loaded.select_single("Size", &choice("regular")).unwrap();
    loaded.toggle_multi("Add-ons", &choice("bacon")).unwrap();
    cart.add_item(loaded.validate().unwrap().finalize());

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), dollars(1000 + 1150));
}

#[test]
fn test_toggling_add_on_twice_matches_plain_configuration() {
    let catalog = menu();
    let burger = product(&catalog, "classic-burger");
    let mut cart = CartStore::new();

    let mut plain = ItemConfigurator::new(burger);
    plain.select_single("Size", &choice("regular")).unwrap();
    cart.add_item(plain.validate().unwrap().finalize());

    let mut undecided = ItemConfigurator::new(burger);
    undecided.select_single("Size", &choice("regular")).unwrap();
    assert!(undecided.toggle_multi("Add-ons", &choice("bacon")).unwrap());
    assert!(!undecided.toggle_multi("Add-ons", &choice("bacon")).unwrap());
    assert_eq!(undecided.unit_price(), dollars(1000));
    cart.add_item(undecided.validate().unwrap().finalize());

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_items(), 2);
}

#[test]
fn test_required_option_blocks_add() {
    let catalog = menu();
    let pizza = product(&catalog, "margherita");

    let mut dialog = ItemConfigurator::new(pizza);
    let err = dialog.validate().unwrap_err();
    assert_eq!(
        err,
        ConfiguratorError::MissingRequired {
            option: "Crust".to_string()
        }
    );

    dialog.select_single("Crust", &choice("thick")).unwrap();
    let line = dialog.validate().unwrap().finalize();
    assert_eq!(line.unit_price, dollars(1449));
}

#[test]
fn test_product_without_options_is_added_immediately() {
    let catalog = menu();
    let mut cart = CartStore::new();

    let dialog = ItemConfigurator::new(product(&catalog, "lemonade"));
    let line = dialog.validate().unwrap().finalize();
    assert_eq!(line.unit_price, dollars(299));
    cart.add_item(line);

    assert_eq!(cart.total_items(), 1);
    assert_eq!(cart.total_price(), dollars(299));
}

#[test]
fn test_quantity_never_drops_below_one() {
    let catalog = menu();
    let mut dialog = ItemConfigurator::new(product(&catalog, "garlic-bread"));

    dialog.decrease_quantity();
    assert_eq!(dialog.quantity(), 1);
    dialog.set_quantity(-4);
    assert_eq!(dialog.quantity(), 1);
    dialog.set_quantity(3);
    assert_eq!(dialog.total_price(), dollars(1497));
}

// =============================================================================
// Cart Editing
// =============================================================================

#[test]
fn test_update_and_remove_keep_totals_in_sync() {
    let catalog = menu();
    let mut cart = CartStore::new();
    for id in ["garlic-bread", "lemonade"] {
        let dialog = ItemConfigurator::new(product(&catalog, id));
        cart.add_item(dialog.validate().unwrap().finalize());
    }

    cart.update_quantity(&ProductId::new("lemonade"), 4);
    assert_eq!(cart.total_items(), 5);
    assert_eq!(cart.total_price(), dollars(499 + 4 * 299));

    cart.update_quantity(&ProductId::new("garlic-bread"), 0);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_price(), dollars(4 * 299));

    assert_eq!(cart.remove_item(&ProductId::new("lemonade")), 1);
    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_price(), dollars(0));
}

#[test]
fn test_remove_item_drops_every_variant() {
    let catalog = menu();
    let burger = product(&catalog, "classic-burger");
    let mut cart = CartStore::new();

    for size in ["regular", "large"] {
        let mut dialog = ItemConfigurator::new(burger);
        dialog.select_single("Size", &choice(size)).unwrap();
        cart.add_item(dialog.validate().unwrap().finalize());
    }
    assert_eq!(cart.len(), 2);

    assert_eq!(cart.remove_item(&ProductId::new("classic-burger")), 2);
    assert!(cart.is_empty());
}

#[test]
fn test_remove_entry_drops_one_variant() {
    let catalog = menu();
    let burger = product(&catalog, "classic-burger");
    let mut cart = CartStore::new();

    for size in ["regular", "large"] {
        let mut dialog = ItemConfigurator::new(burger);
        dialog.select_single("Size", &choice(size)).unwrap();
        cart.add_item(dialog.validate().unwrap().finalize());
    }

    let large = cart.items()[1].customizations.clone();
    assert!(cart.remove_entry(&ProductId::new("classic-burger"), large.as_ref()));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_price(), dollars(1000));
}

#[test]
fn test_line_item_serializes_with_customizations() {
    let catalog = menu();
    let mut dialog = ItemConfigurator::new(product(&catalog, "classic-burger"));
    dialog.select_single("Size", &choice("large")).unwrap();
    dialog.toggle_multi("Add-ons", &choice("bacon")).unwrap();
    dialog.toggle_multi("Add-ons", &choice("cheese")).unwrap();
    let line = dialog.validate().unwrap().finalize();

    let json = serde_json::to_value(&line).unwrap();
    assert_eq!(json["id"], "classic-burger");
    assert_eq!(json["customizations"]["Size"], "large");
    assert_eq!(json["customizations"]["Add-ons"], serde_json::json!(["bacon", "cheese"]));
}
