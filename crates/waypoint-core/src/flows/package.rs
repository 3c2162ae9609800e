//! Promotional package flow.
//!
//! Eight strictly linear steps. The exclusions step is optional and can be
//! skipped with a "use defaults" shortcut, which still completes the step
//! with synthesized data so the completed set stays contiguous.

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    controller::WizardController,
    error::Result,
    machine::Event,
    models::{StepDescriptor, StepId, StepTable},
    record::{overwrite, Patch, Record},
};

pub const FLOW_NAME: &str = "package";

pub const HOTEL: StepId = 1;
pub const DETAILS: StepId = 2;
pub const INCLUSIONS: StepId = 3;
pub const EXCLUSIONS: StepId = 4;
pub const PRICING: StepId = 5;
pub const AVAILABILITY: StepId = 6;
pub const MEDIA: StepId = 7;
pub const REVIEW: StepId = 8;

/// Exclusions applied by the "use defaults" shortcut.
pub const DEFAULT_EXCLUSIONS: [&str; 4] = [
    "Airport transfers",
    "Travel insurance",
    "Personal expenses",
    "Meals not listed under inclusions",
];

/// Accumulated package listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PackageListing {
    pub hotel_id: Option<String>,
    pub hotel_name: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub nights: Option<u16>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub discount_percent: Option<u8>,
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub valid_from: Option<Date>,
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub valid_until: Option<Date>,
    pub media: Option<Vec<String>>,
    pub publish: Option<bool>,
}

/// Partial package listing contributed by one step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PackagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub valid_from: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub valid_until: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
}

impl PackagePatch {
    /// Step data synthesized by the "use defaults" exclusions shortcut.
    pub fn default_exclusions() -> Self {
        Self {
            exclusions: Some(DEFAULT_EXCLUSIONS.iter().map(ToString::to_string).collect()),
            ..Self::default()
        }
    }
}

impl PackageListing {
    /// Price after the package discount.
    pub fn discounted_price(&self) -> Option<f64> {
        let price = self.price?;
        let discount = f64::from(self.discount_percent.unwrap_or(0).min(100));
        Some(price * (100.0 - discount) / 100.0)
    }

    /// Whether the availability window is set and not inverted.
    pub fn has_valid_window(&self) -> bool {
        match (self.valid_from, self.valid_until) {
            (Some(from), Some(until)) => from <= until,
            _ => false,
        }
    }
}

impl Patch for PackagePatch {}

impl Record for PackageListing {
    type Patch = PackagePatch;

    const SCHEMA_VERSION: u32 = 1;

    fn merge(&mut self, patch: PackagePatch) {
        overwrite(&mut self.hotel_id, patch.hotel_id);
        overwrite(&mut self.hotel_name, patch.hotel_name);
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.nights, patch.nights);
        overwrite(&mut self.inclusions, patch.inclusions);
        overwrite(&mut self.exclusions, patch.exclusions);
        overwrite(&mut self.price, patch.price);
        overwrite(&mut self.currency, patch.currency);
        overwrite(&mut self.discount_percent, patch.discount_percent);
        overwrite(&mut self.valid_from, patch.valid_from);
        overwrite(&mut self.valid_until, patch.valid_until);
        overwrite(&mut self.media, patch.media);
        overwrite(&mut self.publish, patch.publish);
    }
}

/// Complete the exclusions step with the default list.
///
/// Rejected like any other completion when the flow is not on the
/// exclusions step.
pub fn use_default_exclusions(wizard: &mut WizardController<PackageListing>) -> Event<PackageListing> {
    wizard.complete_step(EXCLUSIONS, PackagePatch::default_exclusions())
}

fn details_title(listing: &PackageListing) -> String {
    match &listing.hotel_name {
        Some(hotel) if !hotel.is_empty() => format!("Describe your package at {hotel}"),
        _ => "Describe your package".to_string(),
    }
}

/// Build the package listing step table.
pub fn table() -> Result<StepTable<PackageListing>> {
    StepTable::builder(FLOW_NAME)
        .step(
            StepDescriptor::new(HOTEL, "Which hotel is this package for?")
                .done_when(|l: &PackageListing| l.hotel_id.is_some()),
        )
        .step(
            StepDescriptor::derived(DETAILS, details_title)
                .done_when(|l: &PackageListing| l.name.is_some()),
        )
        .step(StepDescriptor::new(INCLUSIONS, "What's included?"))
        .step(
            StepDescriptor::new(EXCLUSIONS, "What's not included?")
                .with_description("Skip to use the standard exclusions")
                .optional(),
        )
        .step(
            StepDescriptor::new(PRICING, "Set the package price")
                .done_when(|l: &PackageListing| l.price.is_some_and(|price| price > 0.0)),
        )
        .step(
            StepDescriptor::new(AVAILABILITY, "When is this package available?")
                .done_when(PackageListing::has_valid_window),
        )
        .step(StepDescriptor::new(MEDIA, "Add photos and media").optional())
        .step(StepDescriptor::new(REVIEW, "Review and publish"))
        .build()
}
