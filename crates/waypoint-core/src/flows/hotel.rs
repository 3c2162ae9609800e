//! Hotel listing flow.
//!
//! Thirteen steps. Steps 5 to 9 describe one room type; the summary step
//! loops back to step 5 when submitted with `addAnother`, so a property can
//! list any number of room types without a nested flow.

use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{StepDescriptor, StepId, StepTable},
    record::{overwrite, Patch, Record},
};

pub const FLOW_NAME: &str = "hotel";

pub const PROPERTY_TYPE: StepId = 1;
pub const LOCATION: StepId = 2;
pub const PROPERTY_DETAILS: StepId = 3;
pub const PROPERTY_AMENITIES: StepId = 4;
pub const ROOM_TYPE: StepId = 5;
pub const ROOM_BASICS: StepId = 6;
pub const BED_CONFIGURATION: StepId = 7;
pub const ROOM_AMENITIES: StepId = 8;
pub const ROOM_SUMMARY: StepId = 9;
pub const PHOTOS: StepId = 10;
pub const POLICIES: StepId = 11;
pub const PRICING: StepId = 12;
pub const REVIEW: StepId = 13;

/// Signal on the room summary step asking for one more room type.
pub const ADD_ANOTHER: &str = "addAnother";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Hotel,
    Resort,
    Apartment,
    Villa,
    GuestHouse,
    Hostel,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PropertyType::Hotel => "hotel",
            PropertyType::Resort => "resort",
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::GuestHouse => "guest house",
            PropertyType::Hostel => "hostel",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum BedKind {
    Single,
    Double,
    Queen,
    King,
    Sofa,
    Bunk,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub kind: BedKind,
    pub count: u8,
}

/// A finished room type, appended by the room summary step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub kind: String,
    pub name: String,
    pub size_sqm: Option<f64>,
    pub max_guests: u8,
    pub units: u16,
    pub beds: Vec<Bed>,
    pub amenities: Vec<String>,
}

/// Accumulated hotel listing.
///
/// The `room*` fields hold the room type currently being described; the
/// summary step folds them into `rooms`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct HotelListing {
    pub property_type: Option<PropertyType>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub name: Option<String>,
    pub star_rating: Option<u8>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub room_kind: Option<String>,
    pub room_name: Option<String>,
    pub room_size_sqm: Option<f64>,
    pub room_max_guests: Option<u8>,
    pub room_units: Option<u16>,
    pub room_beds: Option<Vec<Bed>>,
    pub room_amenities: Option<Vec<String>>,
    pub rooms: Option<Vec<RoomType>>,
    pub photos: Option<Vec<String>>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub cancellation_policy: Option<String>,
    pub base_price: Option<f64>,
    pub currency: Option<String>,
    pub publish: Option<bool>,
}

/// Partial hotel listing contributed by one step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct HotelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_size_sqm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_max_guests: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_units: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_beds: Option<Vec<Bed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<RoomType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
    /// Loop back to the room type step after the summary. Not stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_another: Option<bool>,
    /// Unset every `room*` field before the rest of the patch applies.
    /// Not stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_room: Option<bool>,
}

impl HotelListing {
    /// Label used in derived titles before a property type is chosen.
    pub fn property_label(&self) -> String {
        self.property_type
            .map_or_else(|| "property".to_string(), |kind| kind.to_string())
    }

    /// The room type currently being described, if its basics are filled in.
    pub fn pending_room(&self) -> Option<RoomType> {
        let kind = self.room_kind.clone().filter(|kind| !kind.is_empty())?;
        let name = self.room_name.clone().filter(|name| !name.is_empty())?;
        Some(RoomType {
            kind,
            name,
            size_sqm: self.room_size_sqm,
            max_guests: self.room_max_guests?,
            units: self.room_units.unwrap_or(1),
            beds: self.room_beds.clone().unwrap_or_default(),
            amenities: self.room_amenities.clone().unwrap_or_default(),
        })
    }

    fn clear_pending_room(&mut self) {
        self.room_kind = None;
        self.room_name = None;
        self.room_size_sqm = None;
        self.room_max_guests = None;
        self.room_units = None;
        self.room_beds = None;
        self.room_amenities = None;
    }

    pub fn room_count(&self) -> usize {
        self.rooms.as_ref().map_or(0, Vec::len)
    }
}

impl HotelPatch {
    /// Summary-step patch: append the pending room to `rooms` and clear it.
    ///
    /// Clearing makes the commit idempotent, so completing the summary again
    /// after navigating back does not append the same room twice, and the
    /// next pass through the room steps starts empty.
    pub fn commit_room(listing: &HotelListing, add_another: bool) -> Self {
        let mut rooms = listing.rooms.clone().unwrap_or_default();
        rooms.extend(listing.pending_room());

        Self {
            rooms: Some(rooms),
            add_another: Some(add_another),
            clear_room: Some(true),
            ..Self::default()
        }
    }
}

impl Patch for HotelPatch {
    fn signal(&self, name: &str) -> bool {
        name == ADD_ANOTHER && self.add_another == Some(true)
    }
}

impl Record for HotelListing {
    type Patch = HotelPatch;

    const SCHEMA_VERSION: u32 = 1;

    fn merge(&mut self, patch: HotelPatch) {
        if patch.clear_room == Some(true) {
            self.clear_pending_room();
        }
        overwrite(&mut self.property_type, patch.property_type);
        overwrite(&mut self.address, patch.address);
        overwrite(&mut self.city, patch.city);
        overwrite(&mut self.country, patch.country);
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.star_rating, patch.star_rating);
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.amenities, patch.amenities);
        overwrite(&mut self.room_kind, patch.room_kind);
        overwrite(&mut self.room_name, patch.room_name);
        overwrite(&mut self.room_size_sqm, patch.room_size_sqm);
        overwrite(&mut self.room_max_guests, patch.room_max_guests);
        overwrite(&mut self.room_units, patch.room_units);
        overwrite(&mut self.room_beds, patch.room_beds);
        overwrite(&mut self.room_amenities, patch.room_amenities);
        overwrite(&mut self.rooms, patch.rooms);
        overwrite(&mut self.photos, patch.photos);
        overwrite(&mut self.check_in_time, patch.check_in_time);
        overwrite(&mut self.check_out_time, patch.check_out_time);
        overwrite(&mut self.cancellation_policy, patch.cancellation_policy);
        overwrite(&mut self.base_price, patch.base_price);
        overwrite(&mut self.currency, patch.currency);
        overwrite(&mut self.publish, patch.publish);
    }
}

fn location_title(listing: &HotelListing) -> String {
    format!("Where is your {} located?", listing.property_label())
}

fn details_title(listing: &HotelListing) -> String {
    format!("Tell us about your {}", listing.property_label())
}

fn amenities_title(listing: &HotelListing) -> String {
    format!("What does your {} offer?", listing.property_label())
}

fn room_type_title(listing: &HotelListing) -> String {
    match listing.room_count() {
        0 => "Add your first room type".to_string(),
        n => format!("Add room type #{}", n + 1),
    }
}

fn has_location(listing: &HotelListing) -> bool {
    listing.city.is_some() && listing.country.is_some()
}

fn has_rooms(listing: &HotelListing) -> bool {
    listing.room_count() > 0
}

fn has_price(listing: &HotelListing) -> bool {
    listing.base_price.is_some_and(|price| price > 0.0)
}

/// Build the hotel listing step table.
pub fn table() -> Result<StepTable<HotelListing>> {
    StepTable::builder(FLOW_NAME)
        .step(
            StepDescriptor::new(PROPERTY_TYPE, "What type of property are you listing?")
                .done_when(|l: &HotelListing| l.property_type.is_some()),
        )
        .step(StepDescriptor::derived(LOCATION, location_title).done_when(has_location))
        .step(
            StepDescriptor::derived(PROPERTY_DETAILS, details_title)
                .with_description("Name, star rating and a short description guests will see")
                .done_when(|l: &HotelListing| l.name.is_some()),
        )
        .step(StepDescriptor::derived(PROPERTY_AMENITIES, amenities_title).optional())
        .step(StepDescriptor::derived(ROOM_TYPE, room_type_title))
        .step(
            StepDescriptor::new(ROOM_BASICS, "Room basics")
                .with_description("Name, size, guest capacity and number of identical units"),
        )
        .step(StepDescriptor::new(BED_CONFIGURATION, "Bed configuration"))
        .step(StepDescriptor::new(ROOM_AMENITIES, "Room amenities").optional())
        .step(
            StepDescriptor::new(ROOM_SUMMARY, "Room summary")
                .with_description("Review this room type or add another one")
                .done_when(has_rooms),
        )
        .step(StepDescriptor::new(PHOTOS, "Add photos of your property"))
        .step(StepDescriptor::new(POLICIES, "House policies"))
        .step(StepDescriptor::new(PRICING, "Set your pricing").done_when(has_price))
        .step(StepDescriptor::new(REVIEW, "Review and publish"))
        .branch(ROOM_SUMMARY, ROOM_TYPE, ADD_ANOTHER)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_with_room() -> HotelListing {
        HotelListing {
            room_kind: Some("double".to_string()),
            room_name: Some("Deluxe Double".to_string()),
            room_max_guests: Some(2),
            room_beds: Some(vec![Bed {
                kind: BedKind::Queen,
                count: 1,
            }]),
            ..HotelListing::default()
        }
    }

    #[test]
    fn test_table_shape() {
        let table = table().unwrap();
        assert_eq!(table.len(), 13);
        assert_eq!(table.first_id(), PROPERTY_TYPE);
        assert_eq!(table.terminal_id(), REVIEW);
        let edge = table.branch_from(ROOM_SUMMARY).unwrap();
        assert_eq!(edge.to, ROOM_TYPE);
        assert_eq!(edge.condition, ADD_ANOTHER);
    }

    #[test]
    fn test_titles_follow_property_type() {
        let table = table().unwrap();
        let mut listing = HotelListing::default();
        let title = &table.get(LOCATION).unwrap().title;
        assert_eq!(title.resolve(&listing), "Where is your property located?");

        listing.property_type = Some(PropertyType::GuestHouse);
        assert_eq!(title.resolve(&listing), "Where is your guest house located?");
    }

    #[test]
    fn test_merge_leaves_absent_fields() {
        let mut listing = HotelListing::default();
        listing.merge(HotelPatch {
            name: Some("Sea Breeze".to_string()),
            city: Some("Lisbon".to_string()),
            ..HotelPatch::default()
        });
        listing.merge(HotelPatch {
            city: Some("Porto".to_string()),
            ..HotelPatch::default()
        });
        assert_eq!(listing.name.as_deref(), Some("Sea Breeze"));
        assert_eq!(listing.city.as_deref(), Some("Porto"));
    }

    #[test]
    fn test_commit_room_appends_and_clears() {
        let mut listing = listing_with_room();
        listing.room_size_sqm = Some(80.0);
        listing.room_units = Some(3);

        let patch = HotelPatch::commit_room(&listing, true);
        assert!(patch.signal(ADD_ANOTHER));
        assert_eq!(patch.rooms.as_ref().map(Vec::len), Some(1));

        listing.merge(patch);
        assert_eq!(listing.room_count(), 1);
        assert!(listing.room_name.is_none());
        assert!(listing.room_size_sqm.is_none());
        assert!(listing.room_max_guests.is_none());
        assert!(listing.room_units.is_none());
        assert!(listing.room_beds.is_none());
        assert!(listing.pending_room().is_none());
    }

    #[test]
    fn test_commit_room_is_idempotent() {
        let mut listing = listing_with_room();
        listing.merge(HotelPatch::commit_room(&listing, false));
        let again = HotelPatch::commit_room(&listing, false);
        assert!(!again.signal(ADD_ANOTHER));
        listing.merge(again);
        assert_eq!(listing.room_count(), 1);
    }

    #[test]
    fn test_clear_room_applies_before_new_values() {
        let mut listing = listing_with_room();
        listing.merge(HotelPatch {
            clear_room: Some(true),
            room_name: Some("Twin".to_string()),
            ..HotelPatch::default()
        });
        assert_eq!(listing.room_name.as_deref(), Some("Twin"));
        assert!(listing.room_kind.is_none());
        assert!(listing.room_beds.is_none());
    }

    #[test]
    fn test_pending_room_needs_basics() {
        assert!(HotelListing::default().pending_room().is_none());
        let room = listing_with_room().pending_room().unwrap();
        assert_eq!(room.units, 1);
        assert_eq!(room.beds.len(), 1);
    }

    #[test]
    fn test_patch_json_uses_camel_case() {
        let patch: HotelPatch =
            serde_json::from_str(r#"{"propertyType":"resort","addAnother":true}"#).unwrap();
        assert_eq!(patch.property_type, Some(PropertyType::Resort));
        assert!(patch.signal(ADD_ANOTHER));
    }
}
