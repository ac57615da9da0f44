//! Request and response types for the seller-side REST API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

use crate::buyer::rest::{DigitalLineItem, PrintLineItem};
use crate::error::ValidationError;
use crate::types::common::{Category, FieldValidation, MediaSubtype, MediaType};
use crate::types::serde_helpers::{controlled_token, iso_date};

/// Catalogue-assigned product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A new or updated product for a vendor's catalogue.
///
/// The print/digital split is carried by [`MediaAttributes`]; the media type
/// on the wire is derived from the chosen variant, and the subtype must
/// belong to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    /// The vendor's own product identifier
    pub product_id: String,
    /// Product display name
    pub product_name: String,
    /// Product landing page
    pub product_url: String,
    /// Whether the product is active, maps to the wire `status` flag
    pub active: bool,
    /// Product description shown to buyers
    pub product_description: String,
    /// Publication the product belongs to
    pub publication_name: String,
    /// Media subtype; must belong to the attributes' media type
    pub media_subtype: MediaSubtype,
    /// Section the product sits in, e.g. `Sport`
    pub section: String,
    /// Subsections, when the vendor subdivides the section
    pub subsections: Vec<String>,
    /// Controlled category
    pub category: Category,
    /// Whether the product is a non-standard placement
    pub non_standard: bool,
    /// First day the product is bookable
    pub start_date: Date,
    /// Last day the product is bookable
    pub end_date: Date,
    /// Product contact name
    pub contact_name: String,
    /// Product contact phone
    pub contact_phone: String,
    /// Product contact email; the catalogue requires one
    pub contact_email: String,
    /// Media kit link
    pub media_kit_url: String,
    /// Rate card link
    pub rate_card_url: String,
    /// Base64-encoded JPEG logo, sent as a data URI when given
    pub logo_jpeg_base64: Option<String>,
    /// Print- or digital-specific attributes
    pub attributes: MediaAttributes,
}

/// Media-type-specific catalogue attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaAttributes {
    /// Attributes of a print product
    Print(PrintAttributes),
    /// Attributes of a digital product
    Digital(DigitalAttributes),
}

impl MediaAttributes {
    /// The media type this attribute set belongs to.
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaAttributes::Print(_) => MediaType::Print,
            MediaAttributes::Digital(_) => MediaType::Digital,
        }
    }
}

/// Catalogue attributes of a print product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintAttributes {
    /// Whether the placement accepts colour
    pub accepts_color: bool,
    /// Audited circulation
    pub circulation: u64,
    /// Available sizes, e.g. `Full Page`, `Half Page`
    pub sizes: Vec<String>,
    /// Available positions, e.g. `Front Half`
    pub available_positions: Vec<String>,
    /// Publishing cycle, e.g. `Daily`
    pub cycle: String,
    /// Days of the week the publication appears
    pub publisher_days: Vec<Weekday>,
    /// Regions the publication covers
    pub regions: Vec<String>,
}

/// Catalogue attributes of a digital product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DigitalAttributes {
    /// Available creative sizes, e.g. `300x250`
    pub sizes: Vec<String>,
    /// Placement type controlled value
    pub placement_type: String,
    /// Placement carries user generated content
    pub has_user_generated_content: bool,
    /// Demographic targeting available
    pub can_demo_target: bool,
    /// Geo targeting by country
    pub can_geo_target_country: bool,
    /// Geo targeting by region
    pub can_geo_target_region: bool,
    /// Geo targeting by city
    pub can_geo_target_city: bool,
    /// Geo targeting by postal code
    pub can_geo_target_postal_codes: bool,
    /// Third-party data targeting via Exelate
    pub can_third_party_data_target_exelate: bool,
    /// Third-party data targeting via BlueKai
    pub can_third_party_data_target_blue_kai: bool,
    /// Behavioural targeting available
    pub can_behaviorally_target: bool,
    /// Placement supports retargeting
    pub is_retargeting: bool,
    /// URL whitelisting available
    pub can_whitelist_urls: bool,
    /// Share of voice can be guaranteed
    pub can_guarantee_sov: bool,
    /// Competitive separation available
    pub can_competitive_separate: bool,
    /// Daily impression cap
    pub max_daily_impressions: u64,
    /// Rate card CPM as a decimal string on the wire
    pub standard_rate_card_cpm: Decimal,
    /// Discounted CPM as a decimal string on the wire
    pub standard_discount_cpm: Decimal,
    /// Positioning controlled value
    pub positioning: String,
    /// Available lengths for video products, e.g. `15`, `30`
    pub video_lengths: Vec<String>,
}

impl ProductDetails {
    /// The media type, derived from the attributes variant.
    pub fn media_type(&self) -> MediaType {
        self.attributes.media_type()
    }

    /// Check the details against the constraints the catalogue will enforce.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_id.is_empty() {
            return Err(ValidationError::missing("productId"));
        }
        if self.product_name.is_empty() {
            return Err(ValidationError::missing("productName"));
        }
        if self.contact_email.is_empty() {
            return Err(ValidationError::missing("contactEmail"));
        }
        if self.start_date > self.end_date {
            return Err(ValidationError::StartAfterEnd {
                field: "startDate",
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.media_subtype.media_type() != self.media_type() {
            return Err(ValidationError::SubtypeForMediaType {
                media_type: self.media_type(),
                sub_media_type: self.media_subtype,
            });
        }
        match &self.attributes {
            MediaAttributes::Print(print) => {
                if print.sizes.is_empty() {
                    return Err(ValidationError::missing("sizes"));
                }
                if print.available_positions.is_empty() {
                    return Err(ValidationError::missing("availablePositions"));
                }
                if print.cycle.is_empty() {
                    return Err(ValidationError::missing("cycle"));
                }
            }
            MediaAttributes::Digital(digital) => {
                if self.media_subtype == MediaSubtype::Video && digital.video_lengths.is_empty() {
                    return Err(ValidationError::missing("length"));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn to_payload(&self) -> SaveProductPayload<'_> {
        let media = match &self.attributes {
            MediaAttributes::Print(print) => MediaAttributesPayload::Print {
                accepts_color: print.accepts_color,
                circulation: print.circulation,
                sizes: &print.sizes,
                available_positions: &print.available_positions,
                cycle: &print.cycle,
                publisher_days: print.publisher_days.iter().copied().map(day_token).collect(),
                regions: &print.regions,
            },
            MediaAttributes::Digital(digital) => MediaAttributesPayload::Digital {
                sizes: &digital.sizes,
                placement_type: &digital.placement_type,
                has_user_generated_content: digital.has_user_generated_content,
                can_demo_target: digital.can_demo_target,
                can_geo_target_country: digital.can_geo_target_country,
                can_geo_target_region: digital.can_geo_target_region,
                can_geo_target_city: digital.can_geo_target_city,
                can_geo_target_postal_codes: digital.can_geo_target_postal_codes,
                can_third_party_data_target_exelate: digital.can_third_party_data_target_exelate,
                can_third_party_data_target_blue_kai: digital.can_third_party_data_target_blue_kai,
                can_behaviorally_target: digital.can_behaviorally_target,
                is_retargeting: digital.is_retargeting,
                can_whitelist_urls: digital.can_whitelist_urls,
                can_guarantee_sov: digital.can_guarantee_sov,
                can_competitive_separate: digital.can_competitive_separate,
                max_daily_impressions: digital.max_daily_impressions,
                standard_rate_card_cpm: digital.standard_rate_card_cpm,
                standard_discount_cpm: digital.standard_discount_cpm,
                positioning: &digital.positioning,
                length: (self.media_subtype == MediaSubtype::Video)
                    .then_some(&digital.video_lengths),
            },
        };
        SaveProductPayload {
            products: vec![ProductEntry {
                standard_attributes: StandardAttributes {
                    product_id: &self.product_id,
                    product_name: &self.product_name,
                    product_url: &self.product_url,
                    status: self.active,
                    product_description: &self.product_description,
                    publication_name: &self.publication_name,
                    media_type: self.media_type(),
                    sub_media_type: self.media_subtype,
                    product_section: &self.section,
                    product_sub_section: &self.subsections,
                    category: self.category,
                    is_non_standard: self.non_standard,
                    start_date: self.start_date,
                    end_date: self.end_date,
                    contact_name: &self.contact_name,
                    contact_phone: &self.contact_phone,
                    contact_email: &self.contact_email,
                    media_kit_url: &self.media_kit_url,
                    rate_card_url: &self.rate_card_url,
                    product_logo: self
                        .logo_jpeg_base64
                        .as_ref()
                        .map(|encoded| format!("data:image/jpeg;base64,{encoded}")),
                    media,
                },
            }],
        }
    }
}

/// Token for a publication day, e.g. `{MONDAY_short}`.
fn day_token(day: Weekday) -> String {
    format!("{{{}_short}}", day.to_string().to_uppercase())
}

/// Wire shape of the catalogue write body.
#[derive(Serialize)]
pub(crate) struct SaveProductPayload<'a> {
    products: Vec<ProductEntry<'a>>,
}

#[derive(Serialize)]
struct ProductEntry<'a> {
    #[serde(rename = "standardAttributes")]
    standard_attributes: StandardAttributes<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StandardAttributes<'a> {
    product_id: &'a str,
    product_name: &'a str,
    #[serde(rename = "productURL")]
    product_url: &'a str,
    status: bool,
    product_description: &'a str,
    publication_name: &'a str,
    #[serde(serialize_with = "controlled_token::serialize")]
    media_type: MediaType,
    #[serde(serialize_with = "controlled_token::serialize")]
    sub_media_type: MediaSubtype,
    product_section: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    product_sub_section: &'a Vec<String>,
    #[serde(serialize_with = "controlled_token::serialize")]
    category: Category,
    is_non_standard: bool,
    #[serde(with = "iso_date")]
    start_date: Date,
    #[serde(with = "iso_date")]
    end_date: Date,
    contact_name: &'a str,
    contact_phone: &'a str,
    contact_email: &'a str,
    #[serde(rename = "mediaKitURL")]
    media_kit_url: &'a str,
    #[serde(rename = "rateCardURL")]
    rate_card_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_logo: Option<String>,
    #[serde(flatten)]
    media: MediaAttributesPayload<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MediaAttributesPayload<'a> {
    #[serde(rename_all = "camelCase")]
    Print {
        accepts_color: bool,
        circulation: u64,
        sizes: &'a Vec<String>,
        available_positions: &'a Vec<String>,
        cycle: &'a str,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        publisher_days: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        regions: &'a Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Digital {
        sizes: &'a Vec<String>,
        #[serde(serialize_with = "controlled_token::serialize")]
        placement_type: &'a String,
        has_user_generated_content: bool,
        can_demo_target: bool,
        can_geo_target_country: bool,
        can_geo_target_region: bool,
        can_geo_target_city: bool,
        can_geo_target_postal_codes: bool,
        can_third_party_data_target_exelate: bool,
        can_third_party_data_target_blue_kai: bool,
        can_behaviorally_target: bool,
        is_retargeting: bool,
        #[serde(rename = "canWhitelistURLs")]
        can_whitelist_urls: bool,
        #[serde(rename = "canGuaranteeSOV")]
        can_guarantee_sov: bool,
        can_competitive_separate: bool,
        max_daily_impressions: u64,
        #[serde(rename = "standardRateCardCPM", with = "rust_decimal::serde::str")]
        standard_rate_card_cpm: Decimal,
        #[serde(rename = "standardDiscountCPM", with = "rust_decimal::serde::str")]
        standard_discount_cpm: Decimal,
        #[serde(serialize_with = "controlled_token::serialize")]
        positioning: &'a String,
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<&'a Vec<String>>,
    },
}

/// Envelope around the catalogue write response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveProductResponse {
    #[serde(default)]
    pub products: Vec<SavedProduct>,
    #[serde(default)]
    pub validation_results: Vec<FieldValidation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SavedProduct {
    pub product_public_id: ProductId,
}

/// A proposal sent in response to a buyer's RFP.
///
/// Line items reuse the buyer-side placement types; the service wants the
/// external id repeated inside the proposal body, which is its own shape and
/// is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalDetails {
    /// The RFP being answered
    pub rfp_id: String,
    /// Caller-owned proposal identifier, passed through verbatim
    pub proposal_external_id: String,
    /// Free-text comments to the buyer
    pub comments: String,
    /// Proposed digital placements
    pub digital_line_items: Vec<DigitalLineItem>,
    /// Proposed print placements
    pub print_line_items: Vec<PrintLineItem>,
    /// Attachments, in the service's own attachment shape
    pub attachments: Vec<serde_json::Value>,
}

impl ProposalDetails {
    /// Create a proposal with no line items or attachments.
    pub fn new(rfp_id: impl Into<String>, proposal_external_id: impl Into<String>) -> Self {
        Self {
            rfp_id: rfp_id.into(),
            proposal_external_id: proposal_external_id.into(),
            comments: String::new(),
            digital_line_items: Vec::new(),
            print_line_items: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.rfp_id.is_empty() {
            return Err(ValidationError::missing("rfpPublicId"));
        }
        if self.proposal_external_id.is_empty() {
            return Err(ValidationError::missing("proposalExternalId"));
        }
        for item in &self.digital_line_items {
            item.validate()?;
        }
        Ok(())
    }

    pub(crate) fn to_payload<'a>(&'a self, vendor_id: &'a str) -> ProposalPayload<'a> {
        ProposalPayload {
            rfp_public_id: &self.rfp_id,
            vendor_public_id: vendor_id,
            proposal_external_id: &self.proposal_external_id,
            proposal: ProposalBody {
                proposal_external_id: &self.proposal_external_id,
                comments: &self.comments,
                digital_line_items: &self.digital_line_items,
                print_line_items: &self.print_line_items,
                attachments: &self.attachments,
            },
        }
    }
}

/// Wire shape of the proposal submission body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProposalPayload<'a> {
    rfp_public_id: &'a str,
    vendor_public_id: &'a str,
    proposal_external_id: &'a str,
    proposal: ProposalBody<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposalBody<'a> {
    proposal_external_id: &'a str,
    comments: &'a str,
    digital_line_items: &'a [DigitalLineItem],
    print_line_items: &'a [PrintLineItem],
    attachments: &'a [serde_json::Value],
}

/// Query parameters for order views.
#[derive(Serialize)]
pub(crate) struct OrdersQuery {
    #[serde(rename = "startDate", with = "iso_date")]
    pub start_date: Date,
    #[serde(
        rename = "endDate",
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Date>,
}

/// Query parameters for RFP views.
#[derive(Serialize)]
pub(crate) struct RfpsQuery {
    #[serde(
        rename = "startDate",
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Date>,
    #[serde(
        rename = "endDate",
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Date>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use super::*;

    fn digital_product() -> ProductDetails {
        ProductDetails {
            product_id: "TIMESSPORTBANNER".to_string(),
            product_name: "Times Sport Banner".to_string(),
            product_url: "https://thetimes.co.uk/sport".to_string(),
            active: true,
            product_description: "Banner across the sport section".to_string(),
            publication_name: "The Times".to_string(),
            media_subtype: MediaSubtype::DisplayDigital,
            section: "Sport".to_string(),
            subsections: vec!["Football".to_string()],
            category: Category::Sports,
            non_standard: false,
            start_date: date!(2015 - 01 - 01),
            end_date: date!(2015 - 12 - 31),
            contact_name: "Brendan Quinn".to_string(),
            contact_phone: "+44 20 0000 0000".to_string(),
            contact_email: "sales@example.com".to_string(),
            media_kit_url: "https://example.com/kit".to_string(),
            rate_card_url: "https://example.com/rates".to_string(),
            logo_jpeg_base64: Some("AAAA".to_string()),
            attributes: MediaAttributes::Digital(DigitalAttributes {
                sizes: vec!["468x60".to_string()],
                placement_type: "TOP".to_string(),
                can_demo_target: true,
                max_daily_impressions: 500_000,
                standard_rate_card_cpm: dec!(15.00),
                standard_discount_cpm: dec!(12.00),
                positioning: "ABOVE_THE_FOLD".to_string(),
                ..DigitalAttributes::default()
            }),
        }
    }

    fn print_product() -> ProductDetails {
        ProductDetails {
            media_subtype: MediaSubtype::DisplayPrint,
            attributes: MediaAttributes::Print(PrintAttributes {
                accepts_color: false,
                circulation: 400_000,
                sizes: vec!["Full Page".to_string(), "Half Page".to_string()],
                available_positions: vec!["Front Half".to_string()],
                cycle: "Daily".to_string(),
                publisher_days: vec![Weekday::Monday, Weekday::Saturday],
                regions: vec!["Manhattan".to_string()],
            }),
            ..digital_product()
        }
    }

    #[test]
    fn test_digital_payload_wire_shape() {
        let json = serde_json::to_value(digital_product().to_payload()).unwrap();
        let attributes = &json["products"][0]["standardAttributes"];
        assert_eq!(attributes["productId"], "TIMESSPORTBANNER");
        assert_eq!(attributes["productURL"], "https://thetimes.co.uk/sport");
        assert_eq!(attributes["mediaType"], "{DIGITAL}");
        assert_eq!(attributes["subMediaType"], "{DISPLAY_DIGITAL}");
        assert_eq!(attributes["category"], "{SPORTS}");
        assert_eq!(attributes["status"], true);
        assert_eq!(attributes["startDate"], "2015-01-01");
        assert_eq!(attributes["productSubSection"][0], "Football");
        assert_eq!(attributes["placementType"], "{TOP}");
        assert_eq!(attributes["positioning"], "{ABOVE_THE_FOLD}");
        assert_eq!(attributes["canDemoTarget"], true);
        assert_eq!(attributes["canWhitelistURLs"], false);
        assert_eq!(attributes["canGuaranteeSOV"], false);
        assert_eq!(attributes["maxDailyImpressions"], 500_000);
        assert_eq!(attributes["standardRateCardCPM"], "15.00");
        assert_eq!(attributes["standardDiscountCPM"], "12.00");
        assert_eq!(
            attributes["productLogo"],
            "data:image/jpeg;base64,AAAA"
        );
        // not a video product: no lengths on the wire
        assert!(attributes.get("length").is_none());
    }

    #[test]
    fn test_print_payload_wire_shape() {
        let json = serde_json::to_value(print_product().to_payload()).unwrap();
        let attributes = &json["products"][0]["standardAttributes"];
        assert_eq!(attributes["mediaType"], "{PRINT}");
        assert_eq!(attributes["subMediaType"], "{DISPLAY_PRINT}");
        assert_eq!(attributes["acceptsColor"], false);
        assert_eq!(attributes["circulation"], 400_000);
        assert_eq!(attributes["sizes"][0], "Full Page");
        assert_eq!(attributes["availablePositions"][0], "Front Half");
        assert_eq!(attributes["cycle"], "Daily");
        assert_eq!(attributes["publisherDays"][0], "{MONDAY_short}");
        assert_eq!(attributes["publisherDays"][1], "{SATURDAY_short}");
        assert_eq!(attributes["regions"][0], "Manhattan");
    }

    #[test]
    fn test_validate_rejects_subtype_mismatch() {
        let mut product = digital_product();
        product.media_subtype = MediaSubtype::Classified;
        assert!(matches!(
            product.validate(),
            Err(ValidationError::SubtypeForMediaType { .. })
        ));
    }

    #[test]
    fn test_validate_requires_video_lengths() {
        let mut product = digital_product();
        product.media_subtype = MediaSubtype::Video;
        assert!(matches!(
            product.validate(),
            Err(ValidationError::MissingField { field: "length" })
        ));

        if let MediaAttributes::Digital(digital) = &mut product.attributes {
            digital.video_lengths = vec!["15".to_string(), "30".to_string()];
        }
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_print_sizes_and_positions() {
        let mut product = print_product();
        if let MediaAttributes::Print(print) = &mut product.attributes {
            print.sizes.clear();
        }
        assert!(matches!(
            product.validate(),
            Err(ValidationError::MissingField { field: "sizes" })
        ));
    }

    #[test]
    fn test_video_lengths_reach_the_wire() {
        let mut product = digital_product();
        product.media_subtype = MediaSubtype::Video;
        if let MediaAttributes::Digital(digital) = &mut product.attributes {
            digital.video_lengths = vec!["15".to_string(), "30".to_string()];
        }
        let json = serde_json::to_value(product.to_payload()).unwrap();
        let attributes = &json["products"][0]["standardAttributes"];
        assert_eq!(attributes["subMediaType"], "{VIDEO}");
        assert_eq!(attributes["length"][0], "15");
    }

    #[test]
    fn test_proposal_payload_repeats_external_id() {
        let mut details = ProposalDetails::new("RFP-42", "PROPOSAL-1");
        details.comments = "Here is our counter-proposal.".to_string();
        let json = serde_json::to_value(details.to_payload("NEWSUK")).unwrap();
        assert_eq!(json["rfpPublicId"], "RFP-42");
        assert_eq!(json["vendorPublicId"], "NEWSUK");
        assert_eq!(json["proposalExternalId"], "PROPOSAL-1");
        assert_eq!(json["proposal"]["proposalExternalId"], "PROPOSAL-1");
        assert_eq!(json["proposal"]["comments"], "Here is our counter-proposal.");
    }

    #[test]
    fn test_orders_query_encodes_dates() {
        let query = OrdersQuery {
            start_date: date!(2015 - 02 - 01),
            end_date: Some(date!(2015 - 02 - 28)),
        };
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "startDate=2015-02-01&endDate=2015-02-28");

        let query = OrdersQuery {
            start_date: date!(2015 - 02 - 01),
            end_date: None,
        };
        assert_eq!(
            serde_urlencoded::to_string(&query).unwrap(),
            "startDate=2015-02-01"
        );
    }
}
