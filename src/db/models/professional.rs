//! Professional catalog models and store queries.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::{deserialize_lenient_f64, present};
use crate::db::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionType {
    Electrician,
    Plumber,
    Carpenter,
    Painter,
    Mason,
    Hvac,
    Gardener,
    Cleaner,
    Locksmith,
    ApplianceRepair,
    Other,
}

impl ProfessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfessionType::Electrician => "electrician",
            ProfessionType::Plumber => "plumber",
            ProfessionType::Carpenter => "carpenter",
            ProfessionType::Painter => "painter",
            ProfessionType::Mason => "mason",
            ProfessionType::Hvac => "hvac",
            ProfessionType::Gardener => "gardener",
            ProfessionType::Cleaner => "cleaner",
            ProfessionType::Locksmith => "locksmith",
            ProfessionType::ApplianceRepair => "appliance_repair",
            ProfessionType::Other => "other",
        }
    }

    /// Label shown to citizens on bookings
    pub fn label(&self) -> &'static str {
        match self {
            ProfessionType::Electrician => "Ηλεκτρολόγος",
            ProfessionType::Plumber => "Υδραυλικός",
            ProfessionType::Carpenter => "Μαραγκός",
            ProfessionType::Painter => "Βαφέας",
            ProfessionType::Mason => "Οικοδόμος",
            ProfessionType::Hvac => "Τεχνικός Κλιματισμού",
            ProfessionType::Gardener => "Κηπουρός",
            ProfessionType::Cleaner => "Καθαριστής",
            ProfessionType::Locksmith => "Κλειδαράς",
            ProfessionType::ApplianceRepair => "Τεχνικός Συσκευών",
            ProfessionType::Other => "Γενικός Τεχνίτης",
        }
    }
}

impl std::str::FromStr for ProfessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electrician" => Ok(Self::Electrician),
            "plumber" => Ok(Self::Plumber),
            "carpenter" => Ok(Self::Carpenter),
            "painter" => Ok(Self::Painter),
            "mason" => Ok(Self::Mason),
            "hvac" => Ok(Self::Hvac),
            "gardener" => Ok(Self::Gardener),
            "cleaner" => Ok(Self::Cleaner),
            "locksmith" => Ok(Self::Locksmith),
            "appliance_repair" => Ok(Self::ApplianceRepair),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown profession: {}", s)),
        }
    }
}

/// Working hours per weekday, as `HH:MM-HH:MM` ranges
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeeklyAvailability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<Vec<String>>,
}

impl WeeklyAvailability {
    /// Same ranges Monday to Friday
    pub fn weekdays(range: &str) -> Self {
        let day = Some(vec![range.to_string()]);
        Self {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub user_id: String,
    pub profession: ProfessionType,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: Option<String>,
    pub years_experience: u32,
    pub hourly_rate: f64,
    pub municipality_subsidized: bool,
    pub subsidized_rate: f64,
    pub rating: f64,
    pub total_reviews: u32,
    pub availability: WeeklyAvailability,
    pub service_areas: Vec<String>,
    pub specializations: Vec<String>,
    pub approved_by_municipality: bool,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfessionalRequest {
    pub user_id: Option<String>,
    pub profession: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub hourly_rate: Option<f64>,
    pub license_number: Option<String>,
    pub years_experience: Option<u32>,
    pub municipality_subsidized: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub subsidized_rate: Option<f64>,
    pub availability: Option<WeeklyAvailability>,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalFilter {
    pub profession: Option<String>,
    pub service_area: Option<String>,
    /// `true` keeps approved entries, any other value keeps unapproved ones
    pub approved: Option<String>,
}

impl ProfessionalFilter {
    pub fn matches(&self, professional: &Professional) -> bool {
        if let Some(profession) = present(&self.profession) {
            if professional.profession.as_str() != profession {
                return false;
            }
        }
        if let Some(area) = present(&self.service_area) {
            let needle = area.to_lowercase();
            if !professional
                .service_areas
                .iter()
                .any(|a| a.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(approved) = present(&self.approved) {
            if professional.approved_by_municipality != (approved == "true") {
                return false;
            }
        }
        true
    }
}

impl Professional {
    pub fn list(store: &Store, filter: &ProfessionalFilter) -> Vec<Professional> {
        store
            .read()
            .professionals
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn find(store: &Store, id: &str) -> Option<Professional> {
        store.read().professionals.iter().find(|p| p.id == id).cloned()
    }

    pub fn insert(store: &Store, professional: Professional) -> Professional {
        let mut tables = store.write();
        tables.professionals.push(professional.clone());
        info!(
            professional_id = %professional.id,
            profession = professional.profession.as_str(),
            "Professional registered, pending municipality approval"
        );
        professional
    }
}
