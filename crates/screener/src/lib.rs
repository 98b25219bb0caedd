//! Listing screener: selects candidate properties from an inventory.
//!
//! This is a pure logic crate. It knows nothing about where the inventory
//! came from or what happens to the candidates afterwards; it only applies
//! the run's `SearchCriteria` to an ordered sequence of listings.

use configuration::SearchCriteria;
use core_types::Property;
use tracing::debug;

pub mod error;

pub use error::ScreenerError;

/// Returns the ordered subsequence of `inventory` satisfying every bound in
/// `criteria`.
///
/// The result preserves the inventory's order and the input is never
/// mutated. An empty result is a valid outcome, not an error. The one
/// failure mode is inconsistent price bounds, which is fatal to the whole
/// run: no candidate should be processed under criteria that cannot admit
/// anything coherent.
pub fn filter(
    inventory: &[Property],
    criteria: &SearchCriteria,
) -> Result<Vec<Property>, ScreenerError> {
    if let (Some(min), Some(max)) = (criteria.min_price, criteria.max_price) {
        if min > max {
            return Err(ScreenerError::InvalidCriteria { min, max });
        }
    }

    let location = criteria
        .location
        .as_deref()
        .map(str::to_lowercase)
        .filter(|needle| !needle.is_empty());

    let candidates: Vec<Property> = inventory
        .iter()
        .filter(|p| {
            if let Some(needle) = &location {
                let in_city = p.city.to_lowercase().contains(needle);
                let in_address = p.address.to_lowercase().contains(needle);
                if !in_city && !in_address {
                    return false;
                }
            }
            if let Some(min) = criteria.min_price {
                if p.price < min {
                    return false;
                }
            }
            if let Some(max) = criteria.max_price {
                if p.price > max {
                    return false;
                }
            }
            if let Some(types) = &criteria.property_types {
                if !types.contains(&p.property_type) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    debug!(
        total = inventory.len(),
        matched = candidates.len(),
        "screened inventory against search criteria"
    );

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PropertyType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn listing(id: &str, city: &str, price: Decimal, kind: PropertyType) -> Property {
        Property {
            id: id.to_string(),
            address: format!("{} Test Lane", id),
            city: city.to_string(),
            state: "TX".to_string(),
            property_type: kind,
            price,
            sqft: 1500,
            monthly_rent: dec!(2000),
            monthly_expenses: dec!(700),
            year_built: 2010,
        }
    }

    fn inventory() -> Vec<Property> {
        vec![
            listing("a", "Austin", dec!(450000), PropertyType::SingleFamily),
            listing("b", "Austin", dec!(380000), PropertyType::Townhouse),
            listing("c", "Dallas", dec!(300000), PropertyType::Condo),
            listing("d", "Houston", dec!(650000), PropertyType::MultiFamily),
        ]
    }

    #[test]
    fn open_criteria_pass_the_inventory_through_unchanged() {
        let inv = inventory();
        let out = filter(&inv, &SearchCriteria::default()).unwrap();
        assert_eq!(out, inv);
    }

    #[test]
    fn filtering_preserves_inventory_order() {
        let inv = inventory();
        let criteria = SearchCriteria {
            max_price: Some(dec!(500000)),
            ..Default::default()
        };
        let out = filter(&inv, &criteria).unwrap();
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn location_match_is_case_insensitive_substring() {
        let inv = inventory();
        let criteria = SearchCriteria {
            location: Some("aust".to_string()),
            ..Default::default()
        };
        let out = filter(&inv, &criteria).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.city == "Austin"));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let inv = inventory();
        let criteria = SearchCriteria {
            min_price: Some(dec!(380000)),
            max_price: Some(dec!(450000)),
            ..Default::default()
        };
        let out = filter(&inv, &criteria).unwrap();
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn property_type_set_restricts_candidates() {
        let inv = inventory();
        let criteria = SearchCriteria {
            property_types: Some(vec![PropertyType::Condo, PropertyType::MultiFamily]),
            ..Default::default()
        };
        let out = filter(&inv, &criteria).unwrap();
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let inv = inventory();
        let criteria = SearchCriteria {
            location: Some("Chicago".to_string()),
            ..Default::default()
        };
        assert_eq!(filter(&inv, &criteria).unwrap(), Vec::<Property>::new());
    }

    #[test]
    fn inverted_price_bounds_are_invalid_criteria() {
        let inv = inventory();
        let criteria = SearchCriteria {
            min_price: Some(dec!(300000)),
            max_price: Some(dec!(200000)),
            ..Default::default()
        };
        assert_eq!(
            filter(&inv, &criteria),
            Err(ScreenerError::InvalidCriteria {
                min: dec!(300000),
                max: dec!(200000),
            })
        );
    }
}
