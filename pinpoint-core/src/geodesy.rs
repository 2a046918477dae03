use pinpoint_types::LatLng;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers using the haversine formula.
pub fn distance_km(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Meters below 1 km, whole kilometers below 1000 km, one decimal above.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round())
    } else if km < 1000.0 {
        format!("{} km", km.round())
    } else {
        format!("{:.1} km", km)
    }
}

/// Renders seconds as `M:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Inverse of [`format_time`]. Rejects anything not shaped like `M:SS`.
pub fn parse_time(text: &str) -> Option<u32> {
    let (mins, secs) = text.split_once(':')?;
    if secs.len() != 2 || mins.is_empty() {
        return None;
    }
    let mins: u32 = mins.parse().ok()?;
    let secs: u32 = secs.parse().ok()?;
    if secs >= 60 {
        return None;
    }
    mins.checked_mul(60)?.checked_add(secs)
}
