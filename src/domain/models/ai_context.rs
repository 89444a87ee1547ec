//! Narrative summary rendered from a menu record.
//!
//! The summary is plain text handed to downstream assistants. It is rebuilt
//! whenever the items change, so nothing here is persisted separately.

use std::fmt::Write;

use super::menu::{MenuItem, MenuRecord};

/// Render the full narrative for a record: details, menu sections, offers.
pub fn render_ai_context(record: &MenuRecord) -> String {
    let mut out = String::new();

    let name = if record.restaurant_name.trim().is_empty() {
        "This restaurant"
    } else {
        record.restaurant_name.trim()
    };
    let _ = write!(out, "{name}");
    if !record.cuisine.trim().is_empty() {
        let _ = write!(out, " serves {} cuisine", record.cuisine.trim());
    }
    if !record.location.trim().is_empty() {
        let _ = write!(out, " at {}", record.location.trim());
    }
    out.push_str(".\n");

    for (label, value) in [
        ("Phone", &record.phone),
        ("Hours", &record.hours),
        ("Website", &record.website),
    ] {
        if !value.trim().is_empty() {
            let _ = writeln!(out, "{label}: {}", value.trim());
        }
    }

    out.push_str(&render_menu_sections(&record.items));

    if !record.special_offers.is_empty() {
        out.push_str("\nSpecial offers:\n");
        for offer in &record.special_offers {
            let _ = writeln!(out, "- {offer}");
        }
    }

    out.trim_end().to_string()
}

/// Group items by category (first-seen order) and list each item.
pub fn render_menu_sections(items: &[MenuItem]) -> String {
    let mut categories: Vec<&str> = Vec::new();
    for item in items {
        if !categories.contains(&item.category.as_str()) {
            categories.push(item.category.as_str());
        }
    }

    let mut out = String::new();
    if items.is_empty() {
        return out;
    }

    out.push_str("\nMenu:\n");
    for category in categories {
        let _ = writeln!(out, "{category}:");
        for item in items.iter().filter(|i| i.category == category) {
            out.push_str(&render_item(item));
            out.push('\n');
        }
    }
    out
}

fn render_item(item: &MenuItem) -> String {
    let mut line = format!("- {}", item.name.trim());
    if !item.price.trim().is_empty() {
        let _ = write!(line, " ({})", item.price.trim());
    }
    if !item.description.trim().is_empty() {
        let _ = write!(line, ": {}", item.description.trim());
    }
    if !item.allergens.is_empty() {
        let allergens: Vec<&str> = item.allergens.iter().map(String::as_str).collect();
        let _ = write!(line, " [allergens: {}]", allergens.join(", "));
    }
    if item.is_popular {
        line.push_str(" [popular]");
    }
    if !item.availability {
        line.push_str(" [currently unavailable]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::menu::{DataSource, MANUAL_SOURCE};

    #[test]
    fn test_groups_by_category() {
        let items = vec![
            MenuItem::new("Fries", "$3").with_category("Sides"),
            MenuItem::new("Burger", "$9").with_category("Mains").with_description("Beef patty"),
            MenuItem::new("Salad", "$4").with_category("Sides"),
        ];

        let rendered = render_menu_sections(&items);
        let sides = rendered.find("Sides:").unwrap();
        let mains = rendered.find("Mains:").unwrap();
        let salad = rendered.find("- Salad ($4)").unwrap();

        assert!(sides < mains);
        assert!(salad < mains);
        assert!(rendered.contains("- Burger ($9): Beef patty"));
    }

    #[test]
    fn test_full_context_includes_details_and_offers() {
        let mut record = MenuRecord::new("t1", MANUAL_SOURCE, DataSource::Manual)
            .with_restaurant_name("Luigi's")
            .with_items(vec![MenuItem::new("Pizza", "$12").with_allergen("gluten").popular()]);
        record.cuisine = "Italian".to_string();
        record.phone = "555-0100".to_string();
        record.special_offers = vec!["Free dessert on Mondays".to_string()];

        let context = render_ai_context(&record);

        assert!(context.starts_with("Luigi's serves Italian cuisine."));
        assert!(context.contains("Phone: 555-0100"));
        assert!(context.contains("- Pizza ($12) [allergens: gluten] [popular]"));
        assert!(context.contains("- Free dessert on Mondays"));
        assert!(!context.contains("Website:"));
    }

    #[test]
    fn test_empty_items_render_nothing() {
        assert!(render_menu_sections(&[]).is_empty());
    }
}
