//! Static vocabulary for the fillable BCIF form.
//!
//! Internal claim fields use snake_case names; the form uses the printed
//! labels and two-letter checkbox tokens below. Checkbox lookup walks the
//! categories in the fixed order of [`CheckboxCategory::ALL`] and the first
//! category containing a key wins.

use crate::fields;

/// Internal field name paired with the printed form label.
pub const TEXT_FIELD_NAMES: &[(&str, &str)] = &[
    (fields::OFFICE_ID, "Office ID Number"),
    (fields::COMPANY, "Company"),
    (fields::CLAIM_NUMBER, "Claim Number"),
    (fields::POLICY_NUMBER, "Policy Number"),
    (fields::VIN, "VIN"),
    (fields::YEAR, "Year"),
    (fields::MAKE, "Make"),
    (fields::MODEL, "Model"),
    (fields::TRIM, "Trim"),
    (fields::CYLINDERS, "Cylinders"),
    (fields::DISPLACEMENT, "Displacement"),
    (fields::ADJUSTER_FIRST_NAME, "Adjuster First Name"),
    (fields::ADJUSTER_LAST_NAME, "Adjuster Last Name"),
    (fields::ADJUSTER_EMAIL, "Adjuster Email"),
    (fields::ADJUSTER_CONTACT, "Adjuster Contact Number"),
    (fields::INSURED_FIRST_NAME, "Insured First Name"),
    (fields::INSURED_LAST_NAME, "Insured Last Name"),
    (fields::OWNER_FIRST_NAME, "Owner First Name"),
    (fields::OWNER_LAST_NAME, "Owner Last Name"),
    (fields::LOSS_ZIP_CODE, "Loss ZIP Code"),
    (fields::LOSS_STATE, "Loss State"),
    (fields::LOSS_DATE, "Date of loss (mm/dd/yyyy)"),
    (fields::ODOMETER, "Odometer (mi)"),
];

/// Condition rating keys paired with the printed row label.
pub const CONDITION_LABELS: &[(&str, &str)] = &[
    ("engine", "Engine"),
    ("transmission", "Transmission"),
    ("paint", "Paint"),
    ("front_tires", "Front Tires"),
    ("rear_tires", "Rear Tires"),
    ("body_glass", "Body/Glass"),
    ("interior", "Interior"),
];

/// Equipment package keys paired with the printed form label.
pub const PACKAGE_LABELS: &[(&str, &str)] = &[
    ("package_1", "Package 1"),
    ("package_2", "Package 2"),
    ("package_3", "Package 3"),
];

/// Checkbox sections of the form, in lookup precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxCategory {
    BodyStyle,
    Transmission,
    Power,
    Convenience,
    Seating,
    Radio,
    Wheels,
    Safety,
    Exterior,
}

impl CheckboxCategory {
    pub const ALL: [CheckboxCategory; 9] = [
        CheckboxCategory::BodyStyle,
        CheckboxCategory::Transmission,
        CheckboxCategory::Power,
        CheckboxCategory::Convenience,
        CheckboxCategory::Seating,
        CheckboxCategory::Radio,
        CheckboxCategory::Wheels,
        CheckboxCategory::Safety,
        CheckboxCategory::Exterior,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckboxCategory::BodyStyle => "body_style",
            CheckboxCategory::Transmission => "transmission",
            CheckboxCategory::Power => "power",
            CheckboxCategory::Convenience => "convenience",
            CheckboxCategory::Seating => "seating",
            CheckboxCategory::Radio => "radio",
            CheckboxCategory::Wheels => "wheels",
            CheckboxCategory::Safety => "safety",
            CheckboxCategory::Exterior => "exterior",
        }
    }

    /// Normalized option key paired with the form's checkbox token.
    pub fn tokens(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CheckboxCategory::BodyStyle => &[
                ("2dr", "2DR"),
                ("4dr", "4DR"),
                ("hatchback", "Hatchback"),
                ("convertible", "Convertible"),
                ("wagon", "Wagon"),
                ("pickup", "Pickup"),
                ("van", "Van"),
                ("utility", "Utility"),
            ],
            CheckboxCategory::Transmission => &[
                ("automatic", "Automatic"),
                ("overdrive", "Overdrive"),
                ("s6", "S6"),
                ("s5", "S5"),
                ("s4", "S4"),
                ("s3", "S3"),
                ("4w", "4W"),
            ],
            CheckboxCategory::Power => &[
                ("power_steering", "PS"),
                ("power_brakes", "PB"),
                ("power_windows", "PW"),
                ("power_locks", "PL"),
                ("power_mirrors", "PM"),
                ("power_driver_seat", "SP"),
                ("power_passenger_seat", "PC"),
                ("power_trunk", "PT"),
                ("power_pedals", "PP"),
                ("power_sliding_door", "PD"),
                ("dual_power_sliding_doors", "DP"),
            ],
            CheckboxCategory::Convenience => &[
                ("air_conditioning", "AC"),
                ("climate_control", "CL"),
                ("dual_air_conditioning", "DA"),
                ("tilt_wheel", "TW"),
                ("cruise_control", "CC"),
                ("intermittent_wipers", "IW"),
                ("console_storage", "CN"),
                ("overhead_console", "CO"),
                ("memory_package", "MM"),
                ("navigation_system", "NV"),
                ("entertainment_center", "EC"),
                ("dual_entertainment_center", "DU"),
                ("telescopic_wheel", "TL"),
                ("heated_steering_wheel", "HW"),
                ("message_center", "MC"),
                ("home_link", "GD"),
                ("rear_defogger", "RD"),
                ("remote_starter", "RJ"),
                ("wood_interior_trim", "WT"),
                ("keyless_entry", "KE"),
                ("rear_power_sunshade", "SZ"),
            ],
            CheckboxCategory::Seating => &[
                ("cloth_seats", "CS"),
                ("bucket_seats", "BS"),
                ("reclining_seats", "RL"),
                ("leather_seats", "LS"),
                ("heated_seats", "SH"),
                ("rear_heated_seats", "RH"),
                ("ventilated_seats", "VB"),
                ("third_row_seat", "3S"),
                ("power_third_seat", "3P"),
                ("retractable_seats", "R3"),
                ("12_passenger", "2P"),
                ("15_passenger", "5P"),
                ("captain_chairs_2", "B2"),
                ("captain_chairs_4", "B4"),
                ("captain_chairs_6", "B6"),
            ],
            CheckboxCategory::Radio => &[
                ("am_radio", "AM"),
                ("fm_radio", "FM"),
                ("stereo", "ST"),
                ("search_seek", "SE"),
                ("cd_player", "CD"),
                ("cassette", "CA"),
                ("steering_wheel_controls", "TQ"),
                ("auxiliary_audio", "M3"),
                ("premium_radio", "UR"),
                ("cd_changer", "SK"),
                ("satellite_radio", "XM"),
                ("equalizer", "EQ"),
            ],
            CheckboxCategory::Wheels => &[
                ("styled_steel_wheels", "SY"),
                ("full_wheel_covers", "FC"),
                ("clad_wheels", "CY"),
                ("aluminum_alloy_wheels", "AW"),
                ("chrome_wheels", "CJ"),
                ("20_inch_wheels", "W2"),
                ("wire_wheels", "WW"),
                ("wire_wheel_covers", "WC"),
                ("locking_wheels", "KW"),
            ],
            CheckboxCategory::Safety => &[
                ("drivers_airbag", "AG"),
                ("passenger_airbag", "RG"),
                ("front_side_airbags", "XG"),
                ("rear_side_airbags", "ZG"),
                ("head_curtain_airbags", "DG"),
                ("4wheel_disc_brakes", "DB"),
                ("antilock_brakes_4", "AB"),
                ("antilock_brakes_2", "A2"),
                ("traction_control", "TX"),
                ("stability_control", "T1"),
                ("positraction", "PO"),
                ("communications_system", "C2"),
                ("parking_sensors", "PJ"),
                ("backup_camera", "PX"),
                ("surround_view_camera", "PZ"),
                ("alarm", "TD"),
                ("hands_free_device", "HF"),
                ("xenon_led_headlamps", "XE"),
                ("heads_up_display", "HU"),
                ("intelligent_cruise", "IC"),
                ("blind_spot_detection", "DV"),
                ("lane_departure_warning", "LN"),
                ("night_vision", "VZ"),
                ("roll_bar", "RB"),
            ],
            CheckboxCategory::Exterior => &[
                ("dual_mirrors", "DM"),
                ("heated_mirrors", "HM"),
                ("body_side_moldings", "BN"),
                ("tinted_glass", "TG"),
                ("aftermarket_tint", "AF"),
                ("privacy_glass", "DT"),
                ("rear_window_wiper", "WP"),
                ("fog_lamps", "FL"),
                ("luggage_roof_rack", "RR"),
                ("rear_spoiler", "SL"),
                ("headlamp_washers", "HV"),
                ("signal_integrated_mirrors", "MX"),
                ("wood_grain", "WG"),
                ("clear_coat_paint", "IP"),
                ("metallic_paint", "MP"),
                ("two_tone_paint", "2T"),
                ("three_stage_paint", "HP"),
            ],
        }
    }
}

/// Finds the form token for a normalized option key, walking categories in
/// precedence order.
pub fn checkbox_token(key: &str) -> Option<&'static str> {
    for category in CheckboxCategory::ALL {
        if let Some((_, token)) = category.tokens().iter().find(|(k, _)| *k == key) {
            return Some(token);
        }
    }
    None
}

/// Looks up an external label in a two-column table.
pub fn label_for(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
