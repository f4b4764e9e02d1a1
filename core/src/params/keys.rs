//! Well-known singleton keys (core key space 0..=999)

/// Core key space; each key holds at most one value
pub const CORE_KEYS: std::ops::RangeInclusive<i32> = 0..=999;

// Callbacks handed back to the producing process
pub const CALLBACK: i32 = 0;
pub const ON_DISPLAY_CALLBACK: i32 = 1;

// Identification
pub const SOURCE: i32 = 2;
pub const ICON_NAME: i32 = 3;

// Free text
pub const DESCRIPTION: i32 = 30;
pub const COMMENT: i32 = 31;
pub const RELATIVE_WORKING_DIR: i32 = 32;

// Geocaching
pub const GEOCACHE_CODE: i32 = 40;

// Address
pub const ADDRESS_STREET: i32 = 60;
pub const ADDRESS_CITY: i32 = 61;
pub const ADDRESS_REGION: i32 = 62;
pub const ADDRESS_POST_CODE: i32 = 63;
pub const ADDRESS_COUNTRY: i32 = 64;

// Routing hints
pub const RTE_INDEX: i32 = 100;
pub const RTE_DISTANCE: i32 = 101;
pub const RTE_TIME: i32 = 102;
pub const RTE_SPEED: i32 = 103;
pub const RTE_TURN_COST: i32 = 104;
pub const RTE_POINT_ACTION: i32 = 105;
