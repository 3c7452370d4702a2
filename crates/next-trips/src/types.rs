use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Payload of the `next-trips` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextTripsResponse {
    pub stop_info: StopInfo,
    #[serde(default)]
    pub trips: Vec<NextTrip>,
    pub last_updated: String,
}

/// A transit stop, using GTFS `stops.txt` field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopInfo {
    pub stop_id: String,
    pub stop_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_desc: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_boarding: Option<Accessibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_code: Option<String>,
}

/// One upcoming arrival at the stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextTrip {
    pub trip_id: String,
    pub route_id: String,
    pub route_short_name: String,
    pub route_long_name: String,
    pub trip_headsign: String,

    /// Scheduled arrival, `HH:MM:SS` (may exceed 24h for after-midnight service).
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_sequence: u32,
    pub pickup_type: PickupDropOff,
    pub drop_off_type: PickupDropOff,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_dist_traveled: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timepoint: Option<u8>,

    /// Real-time arrival estimate, when the vehicle is tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_departure: Option<String>,

    /// Delay against the schedule, in seconds. Negative when early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_accessible: Option<Accessibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bikes_allowed: Option<Accessibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_text_color: Option<String>,
}

impl NextTrip {
    /// True when the trip carries a real-time estimate.
    #[must_use]
    pub const fn is_realtime(&self) -> bool {
        self.estimated_arrival.is_some() || self.estimated_departure.is_some()
    }

    /// The arrival time to show: the estimate when present, else the schedule.
    #[must_use]
    pub fn display_time(&self) -> &str {
        self.estimated_arrival.as_deref().unwrap_or(&self.arrival_time)
    }

    /// Delay in whole minutes, half minutes rounding up.
    #[must_use]
    pub fn delay_minutes(&self) -> Option<i64> {
        self.delay.map(|secs| secs.saturating_add(30).div_euclid(60))
    }
}

/// GTFS pickup/drop-off availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum PickupDropOff {
    /// Regularly scheduled.
    #[default]
    Regular = 0,

    /// Not available.
    None = 1,

    /// Must phone the agency.
    PhoneAgency = 2,

    /// Must coordinate with the driver.
    CoordinateWithDriver = 3,
}

/// GTFS accessibility flag, used for wheelchairs and bikes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Accessibility {
    /// No information.
    #[default]
    Unknown = 0,

    /// Accommodated.
    Allowed = 1,

    /// Not accommodated.
    NotAllowed = 2,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trip() -> NextTrip {
        serde_json::from_value(json!({
            "trip_id": "T1",
            "route_id": "R1",
            "route_short_name": "1",
            "route_long_name": "Centro - Universidad",
            "trip_headsign": "Universidad",
            "arrival_time": "08:15:00",
            "departure_time": "08:15:30",
            "stop_sequence": 4,
            "pickup_type": 0,
            "drop_off_type": 1,
            "wheelchair_accessible": 1
        }))
        .expect("should deserialize")
    }

    #[test]
    fn scheduled_trip() {
        let trip = trip();
        assert_eq!(trip.drop_off_type, PickupDropOff::None);
        assert_eq!(trip.wheelchair_accessible, Some(Accessibility::Allowed));
        assert_eq!(trip.bikes_allowed, None);
        assert!(!trip.is_realtime());
        assert_eq!(trip.display_time(), "08:15:00");
        assert_eq!(trip.delay_minutes(), None);
    }

    #[test]
    fn realtime_trip() {
        let trip = NextTrip {
            estimated_arrival: Some("08:17:10".to_string()),
            delay: Some(130),
            ..trip()
        };
        assert!(trip.is_realtime());
        assert_eq!(trip.display_time(), "08:17:10");
        assert_eq!(trip.delay_minutes(), Some(2));

        let early = NextTrip { delay: Some(-95), ..trip };
        assert_eq!(early.delay_minutes(), Some(-2));
    }

    #[test]
    fn extreme_delay() {
        let late = NextTrip { delay: Some(i64::MAX), ..trip() };
        assert_eq!(late.delay_minutes(), Some(i64::MAX / 60));

        let early = NextTrip { delay: Some(i64::MIN), ..trip() };
        assert_eq!(early.delay_minutes(), Some((i64::MIN + 30).div_euclid(60)));
    }

    #[test]
    fn unknown_pickup_type() {
        let err = serde_json::from_value::<PickupDropOff>(json!(7)).unwrap_err();
        assert!(err.to_string().contains('7'));
    }
}
