// Built-in sample data used whenever a catalog slice cannot come from the backend

use rust_decimal::Decimal;

use crate::models::{Cafe, CatalogItem, Event, Promotion};

#[allow(clippy::too_many_arguments)]
fn menu_item(
    id: i32,
    name: &str,
    price: Decimal,
    stock_quantity: u32,
    category: &str,
    sustainability_rating: f64,
    fair_trade: bool,
    organic: bool,
    description: &str,
) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        price,
        stock_quantity,
        category: category.to_string(),
        sustainability_rating,
        fair_trade,
        organic,
        description: description.to_string(),
    }
}

pub fn default_menu() -> Vec<CatalogItem> {
    vec![
        menu_item(1, "Espresso", Decimal::new(250, 2), 50, "Coffee", 4.5, true, true, "Rich, bold espresso shot"),
        menu_item(
            2,
            "Cappuccino",
            Decimal::new(350, 2),
            30,
            "Coffee",
            4.2,
            true,
            false,
            "Perfect balance of espresso, steamed milk, and foam",
        ),
        menu_item(
            3,
            "Latte",
            Decimal::new(400, 2),
            25,
            "Coffee",
            4.0,
            true,
            true,
            "Smooth and creamy with a hint of sweetness",
        ),
        menu_item(4, "Croissant", Decimal::new(200, 2), 15, "Food", 3.8, false, true, "Buttery, flaky pastry"),
        menu_item(
            5,
            "Blueberry Muffin",
            Decimal::new(250, 2),
            20,
            "Food",
            3.5,
            false,
            false,
            "Fresh baked with real blueberries",
        ),
    ]
}

fn cafe(id: i32, name: &str, address: &str, city: &str, features: &[&str], parking: bool) -> Cafe {
    Cafe {
        id,
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        wifi_available: true,
        parking_available: parking,
        open_mic_nights: false,
        coworking_friendly: false,
        is_24_hours: false,
    }
}

pub fn default_cafes() -> Vec<Cafe> {
    vec![
        cafe(
            1,
            "Downtown Café",
            "123 Main Street",
            "Downtown",
            &["WiFi", "Outdoor Seating", "Live Music", "Parking"],
            true,
        ),
        cafe(
            2,
            "University Branch",
            "456 Campus Avenue",
            "University District",
            &["Student Discount", "Study Area", "Quick Service", "WiFi"],
            false,
        ),
        cafe(
            3,
            "Beachside Café",
            "789 Ocean Drive",
            "Beachside",
            &["Ocean View", "Outdoor Seating", "Sunset Views", "WiFi"],
            true,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: i32,
    title: &str,
    date: &str,
    time: &str,
    description: &str,
    price: Decimal,
    max_participants: u32,
    current_participants: u32,
) -> Event {
    Event {
        id,
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        description: description.to_string(),
        price,
        max_participants,
        current_participants,
    }
}

pub fn default_events() -> Vec<Event> {
    vec![
        event(
            1,
            "Coffee Tasting Workshop",
            "2024-01-15",
            "14:00",
            "Learn about different coffee beans and brewing methods",
            Decimal::new(25, 0),
            20,
            12,
        ),
        event(
            2,
            "Live Music Night",
            "2024-01-20",
            "19:00",
            "Local artists performing acoustic sets",
            Decimal::new(15, 0),
            50,
            35,
        ),
        event(
            3,
            "Latte Art Class",
            "2024-01-25",
            "10:00",
            "Learn to create beautiful latte art designs",
            Decimal::new(30, 0),
            15,
            8,
        ),
    ]
}

fn promotion(id: i32, title: &str, description: &str, code: &str, discount_value: i64) -> Promotion {
    Promotion {
        id,
        title: title.to_string(),
        description: description.to_string(),
        code: code.to_string(),
        discount_value: Decimal::from(discount_value),
        valid_until: None,
    }
}

pub fn default_promotions() -> Vec<Promotion> {
    vec![
        promotion(
            1,
            "Student Discount",
            "20% off all items for students with valid ID",
            "STUDENT20",
            20,
        ),
        promotion(2, "Happy Hour", "50% off all drinks from 3-5 PM", "HAPPY50", 50),
        promotion(
            3,
            "First Order Bonus",
            "Get 100 bonus points on your first order",
            "WELCOME100",
            100,
        ),
    ]
}
