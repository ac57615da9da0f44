//! Request and response types for the buyer-side REST API.
//!
//! Everything here is a transient request payload: constructed, validated,
//! serialized, sent, discarded. The only identifiers that survive a call are
//! the ones the service returns ([`CampaignId`], the echoed order public id),
//! which callers must retain themselves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::ValidationError;
use crate::types::common::{FieldValidation, MediaType, OrderStatus};
use crate::types::serde_helpers::{display_fromstr, empty_string_as_none, iso_date};

/// Remote-assigned campaign identifier (a short code such as `CQZU`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub String);

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Envelope around the campaign creation response.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateCampaignResponse {
    #[serde(rename = "campaignId")]
    pub campaign_id: CampaignId,
}

/// Details of an agency campaign to be created.
///
/// The organisation, person and company ids travel as `X-MO-*` request
/// headers; the remaining fields form the JSON body. Validation runs before
/// any network call, so a bad payload never costs a remote round-trip.
///
/// # Example
///
/// ```rust
/// use pats_api_client::buyer::rest::CampaignDetails;
/// use rust_decimal::Decimal;
/// use time::macros::date;
///
/// let details = CampaignDetails::new(
///     "35-IDSDKAD-7",
///     "brenddlo",
///     "PATS3",
///     "Monday test campaign 1",
///     "BQMONDAYTEST1",
///     date!(2015 - 02 - 01),
///     date!(2015 - 02 - 28),
///     "DEM",
/// )
/// .digital()
/// .budget(Decimal::new(1_000_000, 0));
///
/// assert!(details.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDetails {
    /// Agency organisation id, sent as `X-MO-Organization-ID`
    pub organisation_id: String,
    /// Person sending the campaign, sent as `X-MO-Person-ID`
    pub person_id: String,
    /// Buying company id, sent as `X-MO-Company-ID`
    pub company_id: String,
    /// Campaign display name
    pub campaign_name: String,
    /// Caller-owned campaign identifier, passed through verbatim
    pub external_campaign_id: String,
    /// First day of the campaign
    pub start_date: Date,
    /// Last day of the campaign
    pub end_date: Date,
    /// Advertiser code, e.g. `DEM`
    pub advertiser_code: String,
    /// Campaign includes print media
    pub print_campaign: bool,
    /// Campaign includes digital media
    pub digital_campaign: bool,
    /// Overall campaign budget, when known
    pub campaign_budget: Option<Decimal>,
}

impl CampaignDetails {
    /// Create campaign details with neither media flag set.
    ///
    /// At least one of [`print`](Self::print) or [`digital`](Self::digital)
    /// must be applied before the details validate.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        organisation_id: impl Into<String>,
        person_id: impl Into<String>,
        company_id: impl Into<String>,
        campaign_name: impl Into<String>,
        external_campaign_id: impl Into<String>,
        start_date: Date,
        end_date: Date,
        advertiser_code: impl Into<String>,
    ) -> Self {
        Self {
            organisation_id: organisation_id.into(),
            person_id: person_id.into(),
            company_id: company_id.into(),
            campaign_name: campaign_name.into(),
            external_campaign_id: external_campaign_id.into(),
            start_date,
            end_date,
            advertiser_code: advertiser_code.into(),
            print_campaign: false,
            digital_campaign: false,
            campaign_budget: None,
        }
    }

    /// Include print media in the campaign.
    pub fn print(mut self) -> Self {
        self.print_campaign = true;
        self
    }

    /// Include digital media in the campaign.
    pub fn digital(mut self) -> Self {
        self.digital_campaign = true;
        self
    }

    /// Set the overall campaign budget.
    pub fn budget(mut self, budget: Decimal) -> Self {
        self.campaign_budget = Some(budget);
        self
    }

    /// Check the details against the constraints the service will enforce.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.campaign_name.is_empty() {
            return Err(ValidationError::missing("CampaignName"));
        }
        if self.external_campaign_id.is_empty() {
            return Err(ValidationError::missing("CampaignSourceID"));
        }
        if self.start_date > self.end_date {
            return Err(ValidationError::StartAfterEnd {
                field: "StartDate",
                start: self.start_date,
                end: self.end_date,
            });
        }
        if let Some(budget) = self.campaign_budget {
            if budget <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveBudget { budget });
            }
        }
        if !self.print_campaign && !self.digital_campaign {
            return Err(ValidationError::EmptyMediaMix);
        }
        Ok(())
    }

    fn to_payload(&self) -> CampaignPayload<'_> {
        let mut media = Vec::new();
        if self.print_campaign {
            media.push(MediaMixEntry { media_mix: "Print" });
        }
        if self.digital_campaign {
            media.push(MediaMixEntry {
                media_mix: "Online",
            });
        }
        CampaignPayload {
            campaign_name: &self.campaign_name,
            start_date: self.start_date,
            end_date: self.end_date,
            advertiser: &self.advertiser_code,
            external_details: ExternalDetails {
                campaign_source_id: &self.external_campaign_id,
            },
            media_budget: MediaBudget {
                campaign_budget: self.campaign_budget,
                medias: Medias { media },
            },
        }
    }
}

impl Serialize for CampaignDetails {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_payload().serialize(serializer)
    }
}

// Wire shape of the campaign body. The campaign API predates the camelCase
// surface and wants PascalCase names.
#[derive(Serialize)]
struct CampaignPayload<'a> {
    #[serde(rename = "CampaignName")]
    campaign_name: &'a str,
    #[serde(rename = "StartDate", with = "iso_date")]
    start_date: Date,
    #[serde(rename = "EndDate", with = "iso_date")]
    end_date: Date,
    #[serde(rename = "Advertiser")]
    advertiser: &'a str,
    #[serde(rename = "ExternalDetails")]
    external_details: ExternalDetails<'a>,
    #[serde(rename = "MediaBudget")]
    media_budget: MediaBudget,
}

#[derive(Serialize)]
struct ExternalDetails<'a> {
    #[serde(rename = "CampaignSourceID")]
    campaign_source_id: &'a str,
}

#[derive(Serialize)]
struct MediaBudget {
    #[serde(
        rename = "CampaignBudget",
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    campaign_budget: Option<Decimal>,
    #[serde(rename = "Medias")]
    medias: Medias,
}

#[derive(Serialize)]
struct Medias {
    #[serde(rename = "Media")]
    media: Vec<MediaMixEntry>,
}

#[derive(Serialize)]
struct MediaMixEntry {
    #[serde(rename = "MediaMix")]
    media_mix: &'static str,
}

/// A named terms-and-conditions block attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsAndConditions {
    /// Block title, e.g. `Extra Ts and Cs`
    pub name: String,
    /// Block body text
    pub content: String,
}

impl TermsAndConditions {
    /// Create a named terms-and-conditions block.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Generic attributes of an insertion order (print or digital).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionOrderDetails {
    /// Caller-owned order identifier, passed through verbatim; the service
    /// echoes it back as the order's public id and uses it for deduplication
    pub order_id: String,
    /// Publisher (vendor) the order is sent to
    pub publisher_id: String,
    /// Buyer contact first name
    pub agency_buyer_first_name: String,
    /// Buyer contact last name
    pub agency_buyer_last_name: String,
    /// Buyer contact email
    pub agency_buyer_email: String,
    /// Order number shown to the publisher
    pub order_number: String,
    /// Publisher-side recipients of the order
    pub recipient_emails: Vec<String>,
    /// Extra terms and conditions attached to the order
    pub terms_and_conditions: Vec<TermsAndConditions>,
    /// Date the publisher is asked to respond by
    #[serde(with = "iso_date")]
    pub respond_by_date: Date,
    /// Free-text additional information
    pub additional_info: String,
    /// Free-text message to the publisher
    pub message: String,
    /// Buyer-side addresses notified of order events
    pub notify_emails: Vec<String>,
}

impl InsertionOrderDetails {
    /// Create order details with the required identifiers; the remaining
    /// fields start empty and can be filled in directly.
    pub fn new(
        order_id: impl Into<String>,
        publisher_id: impl Into<String>,
        respond_by_date: Date,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            publisher_id: publisher_id.into(),
            agency_buyer_first_name: String::new(),
            agency_buyer_last_name: String::new(),
            agency_buyer_email: String::new(),
            order_number: String::new(),
            recipient_emails: Vec::new(),
            terms_and_conditions: Vec::new(),
            respond_by_date,
            additional_info: String::new(),
            message: String::new(),
            notify_emails: Vec::new(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.order_id.is_empty() {
            return Err(ValidationError::missing("orderId"));
        }
        if self.publisher_id.is_empty() {
            return Err(ValidationError::missing("publisherId"));
        }
        Ok(())
    }
}

/// Fields shared by print and digital line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemCommon {
    /// Position of the line within the order, e.g. `"1"`
    pub line_number: String,
    /// Caller-owned placement identifier, passed through verbatim
    pub external_placement_id: String,
    /// Placement number shown to the publisher
    pub placement_number: String,
    /// Placement display name
    pub placement_name: String,
    /// Cost method, e.g. `CPM`
    pub cost_method: String,
    /// Unit count, stringified on the wire
    #[serde(with = "display_fromstr")]
    pub unit_amount: i64,
    /// Planned cost as a decimal string
    #[serde(with = "rust_decimal::serde::str")]
    pub planned_cost: Decimal,
    /// Unit type, e.g. `Impressions`
    pub unit_type: String,
    /// Targeted section, e.g. `Sport`
    pub section: String,
    /// Sub media type display name, e.g. `Display (Digital)`
    pub sub_media_type: String,
    /// Catalogue product the placement books against
    pub product_id: String,
    /// Buy category, e.g. `Standard`
    pub buy_category: String,
}

/// A print placement within an insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintLineItem {
    /// Fields shared with digital placements
    #[serde(flatten)]
    pub common: LineItemCommon,
    /// Publication the placement runs in, e.g. `Time`
    pub publication: String,
    /// Size of the insertion, e.g. `25x4`
    pub size: String,
    /// Colour code, e.g. `4CLR`
    pub color: String,
    /// Colour display name, e.g. `4 colour`
    pub color_name: String,
    /// Position code, e.g. `Front Half`
    pub print_position: String,
    /// Position display name
    pub position_name: String,
    /// Whether the position is guaranteed, stringified on the wire
    #[serde(with = "display_fromstr")]
    pub is_position_guaranteed: bool,
    /// Whether the insertion also runs in the digital edition
    #[serde(with = "display_fromstr")]
    pub include_in_digital_edition: bool,
    /// Cover date of the issue
    #[serde(with = "iso_date")]
    pub cover_date: Date,
    /// On-sale date of the issue
    #[serde(with = "iso_date")]
    pub sale_date: Date,
    /// Copy deadline
    #[serde(with = "iso_date")]
    pub copy_deadline: Date,
}

/// A delivery window within a digital line item's flighting schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightingEntry {
    /// First day of the window
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the window
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Units delivered in the window, stringified on the wire
    #[serde(with = "display_fromstr")]
    pub unit_amount: i64,
    /// Cost of the window as a decimal string
    #[serde(with = "rust_decimal::serde::str")]
    pub planned_cost: Decimal,
}

/// A digital placement within an insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalLineItem {
    /// Fields shared with print placements
    #[serde(flatten)]
    pub common: LineItemCommon,
    /// Site the placement runs on, e.g. `thetimes.co.uk`
    pub site: String,
    /// Rate as a decimal string
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    /// First day of the flight
    #[serde(with = "iso_date")]
    pub flight_start: Date,
    /// Last day of the flight
    #[serde(with = "iso_date")]
    pub flight_end: Date,
    /// Creative dimensions, e.g. `468x60`
    pub dimensions: String,
    /// Placement position, e.g. `Above the Fold`
    pub dimensions_position: String,
    /// Who serves the creative, e.g. `3rd party`
    pub served_by: String,
    /// Booking category display name
    pub booking_category_name: String,
    /// Delivery windows; each must fall within the flight dates
    pub flighting: Vec<FlightingEntry>,
}

/// A single placement within an insertion order.
///
/// The service distinguishes print and digital placements by the order's
/// media type rather than a discriminant field; both variants serialize to
/// one flat object with their variant-specific fields appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsertionOrderLineItem {
    /// A print placement
    Print(PrintLineItem),
    /// A digital placement
    Digital(DigitalLineItem),
}

impl InsertionOrderLineItem {
    /// The media type of this placement's variant.
    pub fn media_type(&self) -> MediaType {
        match self {
            InsertionOrderLineItem::Print(_) => MediaType::Print,
            InsertionOrderLineItem::Digital(_) => MediaType::Digital,
        }
    }

    /// The placement's `lineNumber`.
    pub fn line_number(&self) -> &str {
        match self {
            InsertionOrderLineItem::Print(item) => &item.common.line_number,
            InsertionOrderLineItem::Digital(item) => &item.common.line_number,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            InsertionOrderLineItem::Print(_) => Ok(()),
            InsertionOrderLineItem::Digital(item) => item.validate(),
        }
    }
}

impl From<PrintLineItem> for InsertionOrderLineItem {
    fn from(item: PrintLineItem) -> Self {
        InsertionOrderLineItem::Print(item)
    }
}

impl From<DigitalLineItem> for InsertionOrderLineItem {
    fn from(item: DigitalLineItem) -> Self {
        InsertionOrderLineItem::Digital(item)
    }
}

impl DigitalLineItem {
    /// Check the flight dates and flighting schedule for consistency.
    ///
    /// The service does not enforce that flighting windows sit inside the
    /// flight dates, but an order violating this is never meant, so it is
    /// rejected here before the round-trip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.flight_start > self.flight_end {
            return Err(ValidationError::StartAfterEnd {
                field: "flightStart",
                start: self.flight_start,
                end: self.flight_end,
            });
        }
        for entry in &self.flighting {
            if entry.start_date > entry.end_date {
                return Err(ValidationError::StartAfterEnd {
                    field: "startDate",
                    start: entry.start_date,
                    end: entry.end_date,
                });
            }
            if entry.start_date < self.flight_start || entry.end_date > self.flight_end {
                return Err(ValidationError::FlightingOutsideFlight {
                    line_number: self.common.line_number.clone(),
                    start: entry.start_date,
                    end: entry.end_date,
                    flight_start: self.flight_start,
                    flight_end: self.flight_end,
                });
            }
        }
        Ok(())
    }
}

/// Parameters for submitting an insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRequest {
    /// Buying company id, sent as `X-MO-Company-ID`
    pub company_id: String,
    /// Person sending the order, sent as `X-MO-Person-ID` when given
    pub person_id: Option<String>,
    /// Campaign the order books against, passed through verbatim
    pub external_campaign_id: String,
    /// Media type of the order; line items must match
    pub media_type: MediaType,
    /// Generic attributes of the order
    pub insertion_order: InsertionOrderDetails,
    /// The order's placements; at least one is required
    pub line_items: Vec<InsertionOrderLineItem>,
}

impl CreateOrderRequest {
    /// Create an order submission.
    pub fn new(
        company_id: impl Into<String>,
        external_campaign_id: impl Into<String>,
        media_type: MediaType,
        insertion_order: InsertionOrderDetails,
        line_items: Vec<InsertionOrderLineItem>,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            person_id: None,
            external_campaign_id: external_campaign_id.into(),
            media_type,
            insertion_order,
            line_items,
        }
    }

    /// Set the person sending the order.
    pub fn person(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    /// Check the submission against the constraints the service will enforce,
    /// plus the flighting consistency check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.company_id.is_empty() {
            return Err(ValidationError::missing("companyId"));
        }
        if self.external_campaign_id.is_empty() {
            return Err(ValidationError::missing("externalCampaignId"));
        }
        self.insertion_order.validate()?;
        if self.line_items.is_empty() {
            return Err(ValidationError::EmptyLineItems);
        }
        for item in &self.line_items {
            if item.media_type() != self.media_type {
                return Err(ValidationError::LineItemMediaType {
                    media_type: self.media_type,
                    line_item: item.media_type(),
                    line_number: item.line_number().to_string(),
                });
            }
            item.validate()?;
        }
        Ok(())
    }

    pub(crate) fn to_payload(&self) -> OrderPayload<'_> {
        OrderPayload {
            external_campaign_id: &self.external_campaign_id,
            media_type: self.media_type,
            insertion_order: &self.insertion_order,
            line_items: &self.line_items,
        }
    }
}

/// Wire shape of the order submission body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderPayload<'a> {
    external_campaign_id: &'a str,
    media_type: MediaType,
    insertion_order: &'a InsertionOrderDetails,
    line_items: &'a [InsertionOrderLineItem],
}

/// Outcome of an order submission, returned whole.
///
/// A FAILED or partially successful submission still carries the echoed
/// public order id and every field validation the service reported; nothing
/// is discarded or summarized on the way through.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    /// Submission status
    pub status: OrderStatus,
    /// Per-field validation messages, possibly empty
    #[serde(default)]
    pub field_validations: Vec<FieldValidation>,
    /// The caller-supplied order id, echoed back
    #[serde(default)]
    pub public_id: Option<String>,
    /// Version counter, 1 on creation, incremented by the service on update
    #[serde(default)]
    pub version: Option<u32>,
}

/// Query parameters for a product catalogue listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListProductsQuery {
    /// First product to load, for paging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    /// Page size cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// Include product logos in the listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_logo: Option<bool>,
}

/// A product catalogue entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier the catalogue assigned to the product
    pub product_public_id: String,
    /// The vendor's own product id
    #[serde(default)]
    pub product_id: Option<String>,
    /// Product display name
    #[serde(default)]
    pub product_name: Option<String>,
    /// Product description, when the vendor supplied one
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub product_description: Option<String>,
    /// Publication the product belongs to
    #[serde(default)]
    pub publication_name: Option<String>,
    /// Media type token as the catalogue returns it
    #[serde(default)]
    pub media_type: Option<String>,
    /// Sub media type token as the catalogue returns it
    #[serde(default)]
    pub sub_media_type: Option<String>,
    /// Whether the product is active
    #[serde(default)]
    pub status: Option<bool>,
}

/// Envelope around the product catalogue listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub validation_results: Vec<FieldValidation>,
}
