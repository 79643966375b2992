//! Static coordinate zones for the CCC estimate page layout.
//!
//! Coordinates use the PDF convention where y grows upward, so a zone's `y`
//! is its top edge and tokens down to `y - height` fall inside it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::PositionedToken;
use crate::fields;

/// A rectangular page region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub page: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Zone {
    pub const fn new(page: u32, x: f32, y: f32, width: f32, height: f32) -> Self {
        Zone {
            page,
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a token's anchor point lies inside this zone.
    pub fn contains(&self, token: &PositionedToken) -> bool {
        token.page == self.page
            && token.x >= self.x
            && token.x <= self.x + self.width
            && token.y >= self.y - self.height
            && token.y <= self.y
    }
}

/// A named field zone with an optional post-parse step.
#[derive(Debug, Clone, Copy)]
pub struct FieldZone {
    pub field: &'static str,
    pub zone: Zone,
    pub parse: Option<ZoneParse>,
}

const fn field_zone(
    field: &'static str,
    zone: Zone,
    parse: Option<ZoneParse>,
) -> FieldZone {
    FieldZone { field, zone, parse }
}

/// Field zones calibrated against the standard CCC estimate header page.
pub const FIELD_ZONES: &[FieldZone] = &[
    field_zone(fields::CLAIM_NUMBER, Zone::new(1, 445.0, 564.0, 100.0, 15.0), None),
    field_zone(fields::POLICY_NUMBER, Zone::new(1, 240.0, 564.0, 130.0, 15.0), None),
    field_zone(
        fields::INSURED_FIRST_NAME,
        Zone::new(1, 89.0, 564.0, 60.0, 15.0),
        Some(ZoneParse::GivenName),
    ),
    field_zone(
        fields::INSURED_LAST_NAME,
        Zone::new(1, 89.0, 564.0, 120.0, 15.0),
        Some(ZoneParse::Surname),
    ),
    field_zone(
        fields::OWNER_FIRST_NAME,
        Zone::new(1, 24.0, 499.0, 60.0, 15.0),
        Some(ZoneParse::GivenName),
    ),
    field_zone(
        fields::OWNER_LAST_NAME,
        Zone::new(1, 24.0, 499.0, 120.0, 15.0),
        Some(ZoneParse::Surname),
    ),
    field_zone(fields::VIN, Zone::new(1, 73.0, 363.0, 150.0, 15.0), None),
    field_zone(
        fields::YEAR,
        Zone::new(1, 24.0, 383.0, 50.0, 15.0),
        Some(ZoneParse::VehicleYear),
    ),
    field_zone(
        fields::MAKE,
        Zone::new(1, 29.0, 383.0, 50.0, 15.0),
        Some(ZoneParse::VehicleMake),
    ),
    field_zone(
        fields::MODEL,
        Zone::new(1, 54.0, 383.0, 80.0, 15.0),
        Some(ZoneParse::VehicleModel),
    ),
    field_zone(
        fields::TRIM,
        Zone::new(1, 98.0, 383.0, 50.0, 15.0),
        Some(ZoneParse::VehicleTrim),
    ),
    field_zone(
        fields::ODOMETER,
        Zone::new(1, 294.0, 349.0, 50.0, 15.0),
        Some(ZoneParse::LeadingNumber),
    ),
    field_zone(fields::LOSS_DATE, Zone::new(1, 267.0, 551.0, 120.0, 15.0), None),
    field_zone(
        fields::LOSS_ZIP_CODE,
        Zone::new(1, 24.0, 472.0, 80.0, 15.0),
        Some(ZoneParse::TrailingZip),
    ),
    field_zone(fields::LOSS_STATE, Zone::new(1, 73.0, 336.0, 30.0, 15.0), None),
    field_zone(
        fields::ADJUSTER_FIRST_NAME,
        Zone::new(1, 240.0, 588.0, 80.0, 15.0),
        Some(ZoneParse::AdjusterFirstName),
    ),
    field_zone(
        fields::ADJUSTER_LAST_NAME,
        Zone::new(1, 275.0, 588.0, 80.0, 15.0),
        Some(ZoneParse::AdjusterLastName),
    ),
    field_zone(
        fields::ADJUSTER_CONTACT,
        Zone::new(1, 350.0, 588.0, 150.0, 15.0),
        Some(ZoneParse::PhoneNumber),
    ),
];

/// Vehicle-option list zones, one per keyword category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCategory {
    Transmission,
    PowerOptions,
    Convenience,
    Radio,
    Safety,
    Seating,
    Wheels,
    Paint,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 8] = [
        OptionCategory::Transmission,
        OptionCategory::PowerOptions,
        OptionCategory::Convenience,
        OptionCategory::Radio,
        OptionCategory::Safety,
        OptionCategory::Seating,
        OptionCategory::Wheels,
        OptionCategory::Paint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptionCategory::Transmission => "transmission",
            OptionCategory::PowerOptions => "power_options",
            OptionCategory::Convenience => "convenience",
            OptionCategory::Radio => "radio",
            OptionCategory::Safety => "safety",
            OptionCategory::Seating => "seating",
            OptionCategory::Wheels => "wheels",
            OptionCategory::Paint => "paint",
        }
    }

    pub fn zone(self) -> Zone {
        match self {
            OptionCategory::Transmission => Zone::new(1, 46.0, 270.0, 130.0, 40.0),
            OptionCategory::PowerOptions => Zone::new(1, 46.0, 190.0, 130.0, 80.0),
            OptionCategory::Convenience => Zone::new(1, 46.0, 109.0, 130.0, 80.0),
            OptionCategory::Radio => Zone::new(1, 181.0, 109.0, 130.0, 190.0),
            OptionCategory::Safety => Zone::new(1, 316.0, 109.0, 130.0, 110.0),
            OptionCategory::Seating => Zone::new(1, 451.0, 190.0, 130.0, 50.0),
            OptionCategory::Wheels => Zone::new(1, 451.0, 163.0, 130.0, 30.0),
            OptionCategory::Paint => Zone::new(1, 451.0, 136.0, 130.0, 30.0),
        }
    }

    /// Option keywords printed inside this category's region of the estimate.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            OptionCategory::Transmission => &[
                "Automatic Transmission",
                "Tilt Wheel",
                "Cruise Control",
                "Rear Defogger",
                "Keyless Entry",
                "Alarm",
                "Message Center",
                "Steering Wheel Touch Controls",
                "Telescopic Wheel",
                "Heated Steering Wheel",
            ],
            OptionCategory::PowerOptions => &[
                "Power Steering",
                "Power Brakes",
                "Power Windows",
                "Power Locks",
                "Power Mirrors",
                "Heated Mirrors",
            ],
            OptionCategory::Convenience => &[
                "Navigation System",
                "Backup Camera",
                "Parking Sensors",
                "Remote Starter",
                "Intelligent Cruise",
                "Dual Mirrors",
                "Privacy Glass",
                "Console/Storage",
                "Air Conditioning",
            ],
            OptionCategory::Radio => &[
                "AM Radio",
                "FM Radio",
                "Stereo",
                "Search/Seek",
                "Auxiliary Audio Connection",
                "Satellite Radio",
            ],
            OptionCategory::Safety => &[
                "Communications System",
                "Hands Free Device",
                "Xenon or L.E.D. Headlamps",
                "Blind Spot Detection",
                "Lane Departure Warning",
                "Drivers Side Air Bag",
                "Passenger Air Bag",
                "Anti-Lock Brakes (4)",
                "4 Wheel Disc Brakes",
                "Traction Control",
                "Stability Control",
                "Front Side Impact Air Bags",
                "Head/Curtain Air Bags",
            ],
            OptionCategory::Seating => &[
                "Cloth Seats",
                "Bucket Seats",
                "Heated Seats",
                "Leather Seats",
                "Reclining Seats",
                "Captain Chairs",
            ],
            OptionCategory::Wheels => &[
                "Aluminum/Alloy Wheels",
                "Styled Steel Wheels",
                "Chrome Wheels",
                "Wire Wheels",
                "Full Wheel Covers",
            ],
            OptionCategory::Paint => &[
                "Clear Coat Paint",
                "Metallic Paint",
                "Two Tone Paint",
                "Three Stage Paint",
            ],
        }
    }
}

/// CCC abbreviations for option keywords, keyed by lowercased keyword.
/// A keyword with an entry here matches through its abbreviations only.
pub const ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("power steering", &["ps", "p/s"]),
    ("power brakes", &["pb", "p/b"]),
    ("power windows", &["pw", "p/w"]),
    ("power locks", &["pl", "p/l"]),
    ("power mirrors", &["pm", "p/m"]),
    ("air conditioning", &["ac", "a/c"]),
    ("cruise control", &["cc", "c/c"]),
    ("tilt wheel", &["tw", "t/w"]),
    ("navigation system", &["nav", "nv"]),
    ("keyless entry", &["ke", "k/e"]),
    ("remote starter", &["rj", "r/j"]),
    ("anti-lock brakes", &["abs", "antilock"]),
    ("aluminum/alloy wheels", &["alloy", "aluminum wheels", "aw"]),
];

pub fn abbreviations_for(keyword: &str) -> Option<&'static [&'static str]> {
    ABBREVIATIONS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, abbrevs)| *abbrevs)
}

lazy_static! {
    // Vehicle line parses: "2025 CHEV Equinox LT1 ..."
    static ref VEHICLE_YEAR: Regex = Regex::new(r"^(\d{4})\s").unwrap();
    static ref VEHICLE_MAKE: Regex = Regex::new(r"^\d{4}\s+(\w+)\s").unwrap();
    static ref VEHICLE_MODEL: Regex = Regex::new(r"^\d{4}\s+\w+\s+(\w+)").unwrap();
    static ref VEHICLE_TRIM: Regex = Regex::new(r"^\d{4}\s+\w+\s+\w+\s+(\w+)").unwrap();

    // Adjuster line parses: "Adjuster Boone Brittany 833 369-2567" after cleanup.
    static ref ADJUSTER_FIRST: Regex = Regex::new(r"Adjuster:?\s+(\w+)").unwrap();
    static ref ADJUSTER_LAST: Regex = Regex::new(r"Adjuster:?\s+\w+,?\s+(\w+)").unwrap();

    // Phone groups; tolerant of parentheses already stripped by cleanup.
    static ref PHONE_GROUPS: Regex =
        Regex::new(r"\(?(\d{3})\)?\s*(\d{3})[-\s]?(\d{4})").unwrap();

    // Name parses for "SURNAME GIVEN" lines.
    static ref GIVEN_NAME: Regex = Regex::new(r"^\w+,?\s+(\w+)").unwrap();
    static ref SURNAME: Regex = Regex::new(r"^(\w+)").unwrap();

    static ref TRAILING_ZIP: Regex = Regex::new(r"(\d{5})$").unwrap();
    static ref LEADING_NUMBER: Regex = Regex::new(r"(\d[\d,]*)").unwrap();
}

/// Field-specific parse applied to cleaned zone text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneParse {
    VehicleYear,
    VehicleMake,
    VehicleModel,
    VehicleTrim,
    AdjusterFirstName,
    AdjusterLastName,
    PhoneNumber,
    GivenName,
    Surname,
    TrailingZip,
    LeadingNumber,
}

impl ZoneParse {
    /// Extract the field value from zone text. `None` means the parse did
    /// not match and the caller should keep the cleaned text as-is.
    pub fn apply(self, text: &str) -> Option<String> {
        match self {
            ZoneParse::VehicleYear => first_capture(&VEHICLE_YEAR, text),
            ZoneParse::VehicleMake => first_capture(&VEHICLE_MAKE, text),
            ZoneParse::VehicleModel => first_capture(&VEHICLE_MODEL, text),
            ZoneParse::VehicleTrim => first_capture(&VEHICLE_TRIM, text),
            ZoneParse::AdjusterFirstName => first_capture(&ADJUSTER_FIRST, text),
            ZoneParse::AdjusterLastName => first_capture(&ADJUSTER_LAST, text),
            ZoneParse::PhoneNumber => PHONE_GROUPS
                .captures(text)
                .map(|c| format!("({}) {}-{}", &c[1], &c[2], &c[3])),
            ZoneParse::GivenName => first_capture(&GIVEN_NAME, text),
            ZoneParse::Surname => first_capture(&SURNAME, text),
            ZoneParse::TrailingZip => first_capture(&TRAILING_ZIP, text),
            ZoneParse::LeadingNumber => first_capture(&LEADING_NUMBER, text),
        }
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zone_contains_respects_downward_height() {
        let zone = Zone::new(1, 445.0, 564.0, 100.0, 15.0);
        let inside = PositionedToken::new("664723-GQ-1", 1, 450.0, 556.0);
        let above = PositionedToken::new("header", 1, 450.0, 566.0);
        let below = PositionedToken::new("footer", 1, 450.0, 548.0);
        let other_page = PositionedToken::new("664723-GQ-1", 2, 450.0, 556.0);

        assert!(zone.contains(&inside));
        assert!(!zone.contains(&above));
        assert!(!zone.contains(&below));
        assert!(!zone.contains(&other_page));
    }

    #[test]
    fn test_zone_boundaries_are_inclusive() {
        let zone = Zone::new(1, 100.0, 200.0, 50.0, 10.0);
        assert!(zone.contains(&PositionedToken::new("a", 1, 100.0, 200.0)));
        assert!(zone.contains(&PositionedToken::new("b", 1, 150.0, 190.0)));
    }

    #[test]
    fn test_vehicle_line_parses() {
        let line = "2025 CHEV Equinox LT1 AWD";
        assert_eq!(ZoneParse::VehicleYear.apply(line).as_deref(), Some("2025"));
        assert_eq!(ZoneParse::VehicleMake.apply(line).as_deref(), Some("CHEV"));
        assert_eq!(ZoneParse::VehicleModel.apply(line).as_deref(), Some("Equinox"));
        assert_eq!(ZoneParse::VehicleTrim.apply(line).as_deref(), Some("LT1"));
    }

    #[test]
    fn test_adjuster_parses_after_cleanup() {
        let line = "Adjuster Boone Brittany 833 369-2567";
        assert_eq!(
            ZoneParse::AdjusterFirstName.apply(line).as_deref(),
            Some("Boone")
        );
        assert_eq!(
            ZoneParse::AdjusterLastName.apply(line).as_deref(),
            Some("Brittany")
        );
        assert_eq!(
            ZoneParse::PhoneNumber.apply(line).as_deref(),
            Some("(833) 369-2567")
        );
    }

    #[test]
    fn test_phone_parse_keeps_original_punctuation_form() {
        assert_eq!(
            ZoneParse::PhoneNumber.apply("(833) 369-2567").as_deref(),
            Some("(833) 369-2567")
        );
    }

    #[test]
    fn test_name_parses() {
        assert_eq!(
            ZoneParse::GivenName.apply("ALSTON JESSICA").as_deref(),
            Some("JESSICA")
        );
        assert_eq!(
            ZoneParse::Surname.apply("ALSTON JESSICA").as_deref(),
            Some("ALSTON")
        );
        assert_eq!(ZoneParse::GivenName.apply("ALSTON"), None);
    }

    #[test]
    fn test_zip_and_number_parses() {
        assert_eq!(
            ZoneParse::TrailingZip.apply("WARRENTON NC 27589").as_deref(),
            Some("27589")
        );
        assert_eq!(ZoneParse::LeadingNumber.apply("6826 mi").as_deref(), Some("6826"));
        assert_eq!(ZoneParse::TrailingZip.apply("WARRENTON NC"), None);
    }

    #[test]
    fn test_every_field_zone_is_unique_by_field() {
        let mut names: Vec<_> = FIELD_ZONES.iter().map(|fz| fz.field).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FIELD_ZONES.len());
    }

    #[test]
    fn test_abbreviation_lookup() {
        assert_eq!(
            abbreviations_for("power steering"),
            Some(&["ps", "p/s"][..])
        );
        assert_eq!(abbreviations_for("heated mirrors"), None);
    }
}
