//! Subsidized pricing for bookings
//!
//! The municipality pays a fixed share of the base price (70% by default),
//! the citizen pays the rest.

use serde::Serialize;

use crate::config::PricingConfig;
use crate::db::models::round_cents;
use crate::db::{ProfessionType, Professional};

/// Shown on bookings for professionals missing from the catalog
const UNKNOWN_PROFESSIONAL_NAME: &str = "Άγνωστος Επαγγελματίας";

/// Name, profession label and hourly rate used to price a booking
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub name: String,
    pub profession: String,
    pub hourly_rate: f64,
}

impl RateCard {
    pub fn for_professional(professional: &Professional) -> Self {
        Self {
            name: professional.name.clone(),
            profession: professional.profession.label().to_string(),
            hourly_rate: professional.hourly_rate,
        }
    }

    /// Fallback for an unknown professional id
    pub fn fallback(hourly_rate: f64) -> Self {
        Self {
            name: UNKNOWN_PROFESSIONAL_NAME.to_string(),
            profession: ProfessionType::Other.label().to_string(),
            hourly_rate,
        }
    }

    pub fn resolve(professional: Option<&Professional>, config: &PricingConfig) -> Self {
        match professional {
            Some(p) => Self::for_professional(p),
            None => Self::fallback(config.default_hourly_rate),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: f64,
    pub municipality_subsidy: f64,
    pub citizen_pays: f64,
}

impl PriceQuote {
    pub fn new(hourly_rate: f64, duration_hours: u32, subsidy_rate: f64) -> Self {
        let base_price = round_cents(hourly_rate * duration_hours as f64);
        let municipality_subsidy = round_cents(base_price * subsidy_rate);
        Self {
            base_price,
            municipality_subsidy,
            citizen_pays: round_cents(base_price - municipality_subsidy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seventy_percent_subsidy() {
        let quote = PriceQuote::new(50.0, 2, 0.7);
        assert_eq!(quote.base_price, 100.0);
        assert_eq!(quote.municipality_subsidy, 70.0);
        assert_eq!(quote.citizen_pays, 30.0);
    }

    #[test]
    fn test_split_adds_up_to_base_price() {
        let quote = PriceQuote::new(45.0, 3, 0.7);
        assert_eq!(quote.base_price, 135.0);
        assert_eq!(quote.municipality_subsidy, 94.5);
        assert_eq!(quote.citizen_pays, 40.5);
    }

    #[test]
    fn test_unknown_professional_uses_default_rate() {
        let config = PricingConfig::default();
        let card = RateCard::resolve(None, &config);
        assert_eq!(card.name, "Άγνωστος Επαγγελματίας");
        assert_eq!(card.profession, "Γενικός Τεχνίτης");
        assert_eq!(card.hourly_rate, 50.0);
    }
}
