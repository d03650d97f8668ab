/// Earth equatorial radius (kilometers)
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.1366;

/// Earth gravitational constant (km^3 s-2)
pub const EARTH_GRAVITATION_MU_KM3_S2: f64 = 398600.4418;

/// Arcseconds to radians
pub const ARCSEC_TO_RAD: f64 = core::f64::consts::PI / 180.0 / 3600.0;

/// TLE element sets are trusted this far on either side of their epoch (days)
pub const TLE_VALIDITY_WINDOW_DAYS: f64 = 14.0;
