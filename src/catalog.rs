//! Selectable characteristics derived from a line's columns.
//!
//! A column is a characteristic only when it appears in [`KNOWN_CHARACTERISTICS`]; the
//! table carries the category and display name, and [`unit_for`] derives the unit.

use serde::Serialize;
use std::fmt;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Environment,
    Economy,
    Infrastructure,
    Businesses,
    Culture,
}

impl Category {
    /// Heading shown above the category's characteristics.
    pub fn label(self) -> &'static str {
        match self {
            Category::Environment => "Geography & environment",
            Category::Economy => "Housing, economy & demographics",
            Category::Infrastructure => "City services",
            Category::Businesses => "Points of interest",
            Category::Culture => "Historical (trade directories)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Characteristic {
    pub key: String,
    pub name: String,
    pub category: Category,
    pub unit: Option<&'static str>,
}

impl Characteristic {
    /// `Name (unit)`, or just the name when there is no unit.
    pub fn label(&self) -> String {
        match self.unit {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }
}

/// A column the catalog knows how to describe.
#[derive(Debug, Clone, Copy)]
pub struct KnownCharacteristic {
    pub key: &'static str,
    pub category: Category,
    pub name: &'static str,
}

const fn known(
    key: &'static str,
    category: Category,
    name: &'static str,
) -> KnownCharacteristic {
    KnownCharacteristic {
        key,
        category,
        name,
    }
}

use Category::{Businesses, Culture, Economy, Environment, Infrastructure};

pub static KNOWN_CHARACTERISTICS: &[KnownCharacteristic] = &[
    // Geography & environment
    known("elevation", Environment, "Elevation"),
    known("noise", Environment, "Average noise"),
    // Housing, economy & demographics
    known("housing_price", Economy, "Average price per square meter"),
    known("census_share_0_18", Economy, "Share of 0-18 individuals"),
    known("census_share_18_39", Economy, "Share of 18-39 individuals"),
    known("census_share_40_64", Economy, "Share of 40-64 individuals"),
    known("census_share_65_100", Economy, "Share of 65+ individuals"),
    known("census_built_a1990", Economy, "Share built after 1990"),
    known("census_built_b1945", Economy, "Share built before 1945"),
    known("census_density", Economy, "Population density"),
    known("census_income", Economy, "Average income"),
    known("census_share_poor", Economy, "Share of poor households"),
    known("census_share_social", Economy, "Share of social housing"),
    // City services
    known("city_fiber", Infrastructure, "Housing units with fiber"),
    known("city_heritage", Infrastructure, "Heritage buildings"),
    known("city_toilets", Infrastructure, "Public toilets"),
    known("city_trees", Infrastructure, "Trees"),
    known("city_velib", Infrastructure, "Velib stations"),
    // Points of interest
    known("poi_bakery", Businesses, "Bakery"),
    known("poi_bank", Businesses, "Bank"),
    known("poi_bar", Businesses, "Bar"),
    known("poi_cafe", Businesses, "Cafe"),
    known("poi_clothes", Businesses, "Clothes shop"),
    known("poi_fastfood", Businesses, "Fast food"),
    known("poi_hairdresser", Businesses, "Hairdresser"),
    known("poi_hotel", Businesses, "Hotel"),
    known("poi_jeweller", Businesses, "Jeweller"),
    known("poi_kindergarten", Businesses, "Kindergarten"),
    known("poi_nightclub", Businesses, "Nightclub"),
    known("poi_pharmacy", Businesses, "Pharmacy"),
    known("poi_playground", Businesses, "Playground"),
    known("poi_police", Businesses, "Police station"),
    known("poi_pub", Businesses, "Pub"),
    known("poi_restaurant", Businesses, "Restaurant"),
    known("poi_school", Businesses, "School"),
    known("poi_supermarket", Businesses, "Supermarket"),
    known("poi_crossing", Businesses, "Crossing"),
    known("poi_parking", Businesses, "Parking"),
    known("poi_lamp", Businesses, "Street lamp"),
    // Historical (trade directories)
    known("historical_rentiers_1829", Culture, "Rentiers (1829)"),
    known("historical_rentiers_1840", Culture, "Rentiers (1840)"),
    known("historical_rentiers_1854", Culture, "Rentiers (1854)"),
    known("historical_rentiers_1885", Culture, "Rentiers (1885)"),
    known("historical_clothing_1829", Culture, "Clothing shops (1829)"),
    known("historical_clothing_1840", Culture, "Clothing shops (1840)"),
    known("historical_clothing_1854", Culture, "Clothing shops (1854)"),
    known("historical_clothing_1885", Culture, "Clothing shops (1885)"),
    known("historical_food_1829", Culture, "Food shops (1829)"),
    known("historical_food_1840", Culture, "Food shops (1840)"),
    known("historical_food_1854", Culture, "Food shops (1854)"),
    known("historical_food_1885", Culture, "Food shops (1885)"),
    known("historical_furniture_1829", Culture, "Furniture shops (1829)"),
    known("historical_furniture_1840", Culture, "Furniture shops (1840)"),
    known("historical_furniture_1854", Culture, "Furniture shops (1854)"),
    known("historical_furniture_1885", Culture, "Furniture shops (1885)"),
    known("historical_luxury_1829", Culture, "Luxury shops (1829)"),
    known("historical_luxury_1840", Culture, "Luxury shops (1840)"),
    known("historical_luxury_1854", Culture, "Luxury shops (1854)"),
    known("historical_luxury_1885", Culture, "Luxury shops (1885)"),
];

pub fn lookup(key: &str) -> Option<&'static KnownCharacteristic> {
    KNOWN_CHARACTERISTICS.iter().find(|k| k.key == key)
}

/// Unit of a characteristic column, if it has one.
pub fn unit_for(key: &str) -> Option<&'static str> {
    if key.starts_with("poi_") || key.starts_with("city_") || key.starts_with("historical_") {
        return Some("per km²");
    }
    if key.starts_with("census_share_") {
        return Some("%");
    }
    match key {
        "housing_price" => Some("€/m²"),
        "noise" => Some("dB"),
        "elevation" => Some("m"),
        "census_density" => Some("people/km²"),
        "census_income" => Some("€/year"),
        "census_built_a1990" | "census_built_b1945" => Some("%"),
        _ => None,
    }
}

/// Sentence-case label for a column outside the table.
pub fn format_field_name(field: &str) -> String {
    let formatted = field
        .replacen("density_", "", 1)
        .replacen("hhshare_", "HH: ", 1)
        .replacen("indshare_", "Pop: ", 1)
        .replace('_', " ");

    let mut chars = formatted.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display name of any column: the curated table name, else [`format_field_name`].
pub fn display_name(key: &str) -> String {
    lookup(key).map_or_else(|| format_field_name(key), |k| k.name.to_string())
}

/// Characteristics available on a dataset, judged from one representative record and
/// sorted by display name.
///
/// Names are compared lowercased rather than with a locale collation; every curated
/// name is ASCII, where the two orders agree.
pub fn build_catalog(sample: &Record) -> Vec<Characteristic> {
    let mut catalog: Vec<Characteristic> = sample
        .characteristics
        .keys()
        .filter_map(|key| {
            let known = lookup(key)?;
            Some(Characteristic {
                key: key.clone(),
                name: known.name.to_string(),
                category: known.category,
                unit: unit_for(key),
            })
        })
        .collect();

    catalog.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.key.cmp(&b.key))
    });
    catalog
}

/// Groups a sorted catalog by category, categories in order of first appearance.
pub fn group_by_category(catalog: &[Characteristic]) -> Vec<(Category, Vec<&Characteristic>)> {
    let mut groups: Vec<(Category, Vec<&Characteristic>)> = Vec::new();
    for c in catalog {
        match groups.iter_mut().find(|(category, _)| *category == c.category) {
            Some((_, members)) => members.push(c),
            None => groups.push((c.category, vec![c])),
        }
    }
    groups
}

pub fn find<'a>(catalog: &'a [Characteristic], key: &str) -> Option<&'a Characteristic> {
    catalog.iter().find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use std::collections::HashSet;

    fn sample(keys: &[&str]) -> Record {
        keys.iter().fold(Record::default(), |r, key| {
            r.with_value(key, FieldValue::Number(1.0))
        })
    }

    #[test]
    fn test_catalog_excludes_unknown_keys() {
        let catalog = build_catalog(&sample(&["elevation", "unknown_field", "poi_bakery"]));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].key, "poi_bakery");
        assert_eq!(catalog[0].name, "Bakery");
        assert_eq!(catalog[0].category, Category::Businesses);
        assert_eq!(catalog[0].unit, Some("per km²"));
        assert_eq!(catalog[1].key, "elevation");
        assert_eq!(catalog[1].category, Category::Environment);
        assert_eq!(catalog[1].unit, Some("m"));
    }

    #[test]
    fn test_catalog_sorted_case_insensitively() {
        let catalog = build_catalog(&sample(&[
            "poi_lamp",
            "noise",
            "housing_price",
            "city_velib",
            "poi_bar",
        ]));
        let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Average noise",
                "Average price per square meter",
                "Bar",
                "Street lamp",
                "Velib stations",
            ]
        );
    }

    #[test]
    fn test_catalog_of_empty_record() {
        assert!(build_catalog(&Record::default()).is_empty());
    }

    #[test]
    fn test_catalog_is_deterministic() {
        let record = sample(&["noise", "poi_cafe", "census_income", "historical_food_1854"]);
        assert_eq!(build_catalog(&record), build_catalog(&record));
    }

    #[test]
    fn test_units() {
        assert_eq!(unit_for("poi_cafe"), Some("per km²"));
        assert_eq!(unit_for("city_trees"), Some("per km²"));
        assert_eq!(unit_for("historical_luxury_1885"), Some("per km²"));
        assert_eq!(unit_for("census_share_0_18"), Some("%"));
        assert_eq!(unit_for("census_built_b1945"), Some("%"));
        assert_eq!(unit_for("housing_price"), Some("€/m²"));
        assert_eq!(unit_for("noise"), Some("dB"));
        assert_eq!(unit_for("census_density"), Some("people/km²"));
        assert_eq!(unit_for("census_income"), Some("€/year"));
        assert_eq!(unit_for("index"), None);
    }

    #[test]
    fn test_format_field_name() {
        assert_eq!(format_field_name("density_bakery"), "Bakery");
        assert_eq!(format_field_name("hhshare_single_parent"), "HH: single parent");
        assert_eq!(format_field_name("indshare_unemployed"), "Pop: unemployed");
        assert_eq!(format_field_name("green_space_ratio"), "Green space ratio");
        assert_eq!(format_field_name(""), "");
    }

    #[test]
    fn test_table_has_unique_keys_and_ascii_names() {
        let keys: HashSet<_> = KNOWN_CHARACTERISTICS.iter().map(|k| k.key).collect();
        assert_eq!(keys.len(), KNOWN_CHARACTERISTICS.len());
        assert!(KNOWN_CHARACTERISTICS.iter().all(|k| k.name.is_ascii()));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("poi_police"), "Police station");
        assert_eq!(display_name("indshare_students"), "Pop: students");
        assert_eq!(display_name("census_income"), "Average income");
    }

    #[test]
    fn test_group_by_category() {
        let catalog = build_catalog(&sample(&["poi_bar", "noise", "poi_cafe", "elevation"]));
        let groups = group_by_category(&catalog);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Environment);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, Category::Businesses);
        assert_eq!(groups[1].1[0].key, "poi_bar");
    }

    #[test]
    fn test_label() {
        let catalog = build_catalog(&sample(&["noise", "city_velib"]));
        let noise = find(&catalog, "noise").map(Characteristic::label);
        assert_eq!(noise.as_deref(), Some("Average noise (dB)"));
        assert_eq!(find(&catalog, "poi_bar"), None);
        assert_eq!(Category::Infrastructure.to_string(), "City services");
    }
}
