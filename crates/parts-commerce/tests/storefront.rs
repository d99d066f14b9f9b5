//! End-to-end checks of cart pricing and vehicle fitment through the public API.

use parts_commerce::prelude::*;

fn part(id: i64, name: &str, pesos: i64) -> CartProduct {
    CartProduct {
        id: ProductId::new(id),
        name: name.to_string(),
        category: "Brakes".to_string(),
        unit_price: Money::new(pesos * 100, Currency::PHP),
        image_url: None,
    }
}

#[test]
fn repeated_adds_merge_into_one_line() {
    let mut cart = Cart::new();
    let rotor = part(1, "Brake Rotor", 1800);

    for _ in 0..7 {
        cart.add_item(&rotor);
    }

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 7);
}

#[test]
fn quantity_never_drops_below_one() {
    let mut cart = Cart::new();
    cart.add_item(&part(1, "Brake Rotor", 1800));

    for delta in [-1, -5, 3, -100, 0, -1] {
        let quantity = cart.update_quantity(ProductId::new(1), delta);
        assert!(quantity.is_some_and(|q| q >= 1));
    }
}

#[test]
fn totals_match_reference_scenario() {
    let mut cart = Cart::new();
    let a = part(1, "Pads", 500);
    let b = part(2, "Caliper", 1000);
    cart.add_item(&a);
    cart.add_item(&a);
    cart.add_item(&b);

    let totals = cart.totals(DeliveryMethod::Standard).unwrap();
    assert_eq!(totals.subtotal.display(), "\u{20b1}2000.00");
    assert_eq!(totals.shipping.display(), "\u{20b1}150.00");
    assert_eq!(totals.total.display(), "\u{20b1}2150.00");
}

#[test]
fn totals_do_not_depend_on_line_order() {
    let mut forward = Cart::new();
    let mut backward = Cart::new();
    let parts = [part(1, "Pads", 500), part(2, "Caliper", 1000), part(3, "Hose", 275)];

    for p in &parts {
        forward.add_item(p);
    }
    for p in parts.iter().rev() {
        backward.add_item(p);
    }

    let f = forward.totals(DeliveryMethod::Standard).unwrap();
    let b = backward.totals(DeliveryMethod::Standard).unwrap();
    assert_eq!(f.total, b.total);
    assert_eq!(f.subtotal, b.subtotal);
}

#[test]
fn removing_absent_id_changes_nothing() {
    let mut cart = Cart::new();
    cart.add_item(&part(1, "Pads", 500));
    let before = cart.lines().to_vec();

    cart.remove_item(ProductId::new(404));
    assert_eq!(cart.lines(), before.as_slice());
}

#[test]
fn overlapping_year_ranges_union_without_duplicates() {
    let catalog = VehicleCatalog::new(vec![
        Vehicle::new(VehicleId::new(1), "Honda", "Civic", 2015, Some(2018)),
        Vehicle::new(VehicleId::new(2), "Honda", "Civic", 2017, Some(2020)),
    ]);

    let years = catalog.years_for_make_model("Honda", "Civic", 2025);
    assert_eq!(years, (2015..=2020).rev().collect::<Vec<_>>());
}

#[test]
fn open_ended_range_reaches_current_year() {
    let catalog = VehicleCatalog::new(vec![Vehicle::new(
        VehicleId::new(1),
        "Toyota",
        "Hilux",
        2016,
        None,
    )]);

    let years = catalog.years_for_make_model("Toyota", "Hilux", 2025);
    assert_eq!(years.first(), Some(&2025));
    assert_eq!(years.last(), Some(&2016));
}

#[test]
fn resolve_outside_range_is_not_found() {
    let catalog = VehicleCatalog::new(vec![Vehicle::new(
        VehicleId::new(1),
        "Toyota",
        "Vios",
        2013,
        Some(2018),
    )]);

    assert!(catalog.resolve_vehicle("Toyota", "Vios", 2020, 2025).is_none());
}

#[test]
fn checkout_to_order_draft() {
    let mut cart = Cart::new();
    cart.add_item(&part(1, "Pads", 500));

    let mut flow = CheckoutFlow::new();
    flow.set_contact(ContactInfo {
        first_name: "Lito".to_string(),
        last_name: "Garcia".to_string(),
        email: "lito@example.ph".to_string(),
        phone: "0917 555 0101".to_string(),
    });
    flow.set_delivery(DeliveryMethod::Standard);
    flow.set_address(ShippingAddress {
        street: "88 Kalayaan Ave".to_string(),
        barangay: "Central".to_string(),
        city: "Quezon City".to_string(),
        province: "Metro Manila".to_string(),
        postal_code: "1100".to_string(),
        landmark: None,
    });
    flow.set_payment(PaymentMethod::BankTransfer);

    let validated = flow.validate().unwrap();
    let draft = OrderDraft::from_checkout(&validated, &cart).unwrap();

    assert_eq!(draft.total, Money::new(65_000, Currency::PHP));
    assert_eq!(draft.lines[0].price_at_purchase, Money::new(50_000, Currency::PHP));
    assert_eq!(draft.status, OrderStatus::Pending);
}

#[test]
fn catalog_query_honours_active_vehicle() {
    let mut fits = Product::new(ProductId::new(1), "Vios Air Filter", "Filters", Money::new(42_000, Currency::PHP))
        .with_stock(4);
    fits.compatible_vehicles = vec![VehicleId::new(1)];
    let mut other = Product::new(ProductId::new(2), "Civic Air Filter", "Filters", Money::new(45_000, Currency::PHP))
        .with_stock(4);
    other.compatible_vehicles = vec![VehicleId::new(2)];
    let universal = Product::new(ProductId::new(3), "Wiper Fluid", "Care", Money::new(15_000, Currency::PHP))
        .with_stock(10);
    let products = vec![fits, other, universal];

    let results = ProductQuery::new()
        .with_filter(Filter::fits(VehicleId::new(1)))
        .with_sort(SortOption::NameAsc)
        .run(&products);

    let names: Vec<_> = results.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Vios Air Filter", "Wiper Fluid"]);
}
