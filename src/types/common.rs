//! Common domain types for the PATS API.

use serde::{Deserialize, Serialize};

/// Media type of a product, campaign or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    /// Print placements (newspapers, magazines)
    Print,
    /// Digital placements (display, video, mobile)
    Digital,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Print => write!(f, "PRINT"),
            MediaType::Digital => write!(f, "DIGITAL"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRINT" => Ok(MediaType::Print),
            "DIGITAL" => Ok(MediaType::Digital),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// Media subtype for product catalogue entries.
///
/// Each subtype belongs to exactly one [`MediaType`]; the pairing is
/// validated locally before a catalogue write goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSubtype {
    /// Print display advertising
    DisplayPrint,
    /// Print classified advertising
    Classified,
    /// Print inserts
    Inserts,
    /// Custom print placements
    PrintCustom,
    /// Digital display advertising
    DisplayDigital,
    /// Digital video
    Video,
    /// Mobile placements
    Mobile,
    /// Tablet placements
    Tablet,
    /// In-app placements
    App,
}

impl MediaSubtype {
    /// The media type this subtype belongs to.
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaSubtype::DisplayPrint
            | MediaSubtype::Classified
            | MediaSubtype::Inserts
            | MediaSubtype::PrintCustom => MediaType::Print,
            MediaSubtype::DisplayDigital
            | MediaSubtype::Video
            | MediaSubtype::Mobile
            | MediaSubtype::Tablet
            | MediaSubtype::App => MediaType::Digital,
        }
    }
}

impl std::fmt::Display for MediaSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MediaSubtype::DisplayPrint => "DISPLAY_PRINT",
            MediaSubtype::Classified => "CLASSIFIED",
            MediaSubtype::Inserts => "INSERTS",
            MediaSubtype::PrintCustom => "PRINT_CUSTOM",
            MediaSubtype::DisplayDigital => "DISPLAY_DIGITAL",
            MediaSubtype::Video => "VIDEO",
            MediaSubtype::Mobile => "MOBILE",
            MediaSubtype::Tablet => "TABLET",
            MediaSubtype::App => "APP",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for MediaSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISPLAY_PRINT" => Ok(MediaSubtype::DisplayPrint),
            "CLASSIFIED" => Ok(MediaSubtype::Classified),
            "INSERTS" => Ok(MediaSubtype::Inserts),
            "PRINT_CUSTOM" => Ok(MediaSubtype::PrintCustom),
            "DISPLAY_DIGITAL" => Ok(MediaSubtype::DisplayDigital),
            "VIDEO" => Ok(MediaSubtype::Video),
            "MOBILE" => Ok(MediaSubtype::Mobile),
            "TABLET" => Ok(MediaSubtype::Tablet),
            "APP" => Ok(MediaSubtype::App),
            other => Err(format!("unknown media subtype: {other}")),
        }
    }
}

/// Controlled category list for product catalogue entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    ArtsAndEntertainment,
    Automotive,
    Business,
    Careers,
    Education,
    FamilyAndParenting,
    HealthAndFitness,
    FoodAndDrink,
    HobbiesAndInterests,
    HomeAndGarden,
    LawGovernmentAndPolitics,
    News,
    PersonalFinance,
    Society,
    Science,
    Pets,
    Sports,
    StyleAndFashion,
    TechnologyAndComputing,
    Travel,
    RealEstate,
    Shopping,
    ReligionAndSpirituality,
    SocialMedia,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::ArtsAndEntertainment => "ARTS_AND_ENTERTAINMENT",
            Category::Automotive => "AUTOMOTIVE",
            Category::Business => "BUSINESS",
            Category::Careers => "CAREERS",
            Category::Education => "EDUCATION",
            Category::FamilyAndParenting => "FAMILY_AND_PARENTING",
            Category::HealthAndFitness => "HEALTH_AND_FITNESS",
            Category::FoodAndDrink => "FOOD_AND_DRINK",
            Category::HobbiesAndInterests => "HOBBIES_AND_INTERESTS",
            Category::HomeAndGarden => "HOME_AND_GARDEN",
            Category::LawGovernmentAndPolitics => "LAW_GOVERNMENT_AND_POLITICS",
            Category::News => "NEWS",
            Category::PersonalFinance => "PERSONAL_FINANCE",
            Category::Society => "SOCIETY",
            Category::Science => "SCIENCE",
            Category::Pets => "PETS",
            Category::Sports => "SPORTS",
            Category::StyleAndFashion => "STYLE_AND_FASHION",
            Category::TechnologyAndComputing => "TECHNOLOGY_AND_COMPUTING",
            Category::Travel => "TRAVEL",
            Category::RealEstate => "REAL_ESTATE",
            Category::Shopping => "SHOPPING",
            Category::ReligionAndSpirituality => "RELIGION_AND_SPIRITUALITY",
            Category::SocialMedia => "SOCIAL_MEDIA",
        };
        write!(f, "{}", s)
    }
}

/// Status of an order submission, as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The order was accepted in full
    Successful,
    /// The order was rejected; field validations carry the reasons
    Failed,
    /// Part of the order was accepted alongside field validations
    #[serde(alias = "PARTIAL")]
    PartiallySuccessful,
    /// A status string this library does not know, preserved verbatim
    #[serde(untagged)]
    Other(String),
}

impl OrderStatus {
    /// Check if the submission was accepted in full.
    pub fn is_successful(&self) -> bool {
        matches!(self, OrderStatus::Successful)
    }

    /// Check if the submission was rejected outright.
    pub fn is_failed(&self) -> bool {
        matches!(self, OrderStatus::Failed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Successful => write!(f, "SUCCESSFUL"),
            OrderStatus::Failed => write!(f, "FAILED"),
            OrderStatus::PartiallySuccessful => write!(f, "PARTIALLY_SUCCESSFUL"),
            OrderStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A single validation record returned by the service.
///
/// Order submissions report these as `fieldValidations`, catalogue writes as
/// `validationResults` (keyed by product). The record is carried verbatim in
/// both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Wire name of the field the message applies to, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Product the message applies to, for catalogue validation records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// The service's message, verbatim
    pub message: String,
}

impl FieldValidation {
    /// Create a record carrying only a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            field: None,
            product_id: None,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_serde() {
        assert_eq!(serde_json::to_string(&MediaType::Print).unwrap(), r#""PRINT""#);
        assert_eq!(
            serde_json::from_str::<MediaType>(r#""DIGITAL""#).unwrap(),
            MediaType::Digital
        );
    }

    #[test]
    fn test_media_subtype_pairing() {
        assert_eq!(MediaSubtype::Classified.media_type(), MediaType::Print);
        assert_eq!(MediaSubtype::Video.media_type(), MediaType::Digital);
        assert_eq!(
            serde_json::to_string(&MediaSubtype::DisplayDigital).unwrap(),
            r#""DISPLAY_DIGITAL""#
        );
    }

    #[test]
    fn test_category_display_matches_serde() {
        let json = serde_json::to_string(&Category::LawGovernmentAndPolitics).unwrap();
        assert_eq!(json, r#""LAW_GOVERNMENT_AND_POLITICS""#);
        assert_eq!(
            Category::LawGovernmentAndPolitics.to_string(),
            "LAW_GOVERNMENT_AND_POLITICS"
        );
    }

    #[test]
    fn test_order_status_serde() {
        assert_eq!(
            serde_json::from_str::<OrderStatus>(r#""SUCCESSFUL""#).unwrap(),
            OrderStatus::Successful
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>(r#""PARTIALLY_SUCCESSFUL""#).unwrap(),
            OrderStatus::PartiallySuccessful
        );
        // unknown statuses are preserved rather than rejected
        assert_eq!(
            serde_json::from_str::<OrderStatus>(r#""ON_HOLD""#).unwrap(),
            OrderStatus::Other("ON_HOLD".to_string())
        );
    }

    #[test]
    fn test_field_validation_deserialize() {
        let json = r#"{"field":"orderId","message":"orderId is required"}"#;
        let validation: FieldValidation = serde_json::from_str(json).unwrap();
        assert_eq!(validation.field.as_deref(), Some("orderId"));
        assert_eq!(validation.message, "orderId is required");
        assert!(validation.product_id.is_none());
    }
}
