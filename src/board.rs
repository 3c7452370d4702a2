//! Plain-text departure board for a stop.

use std::fmt::{self, Display};

use next_trips::{NextTrip, StopInfo};

const HEADSIGN_WIDTH: usize = 24;

/// Renders upcoming trips one per line: route, headsign, time, status.
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    stop: Option<&'a StopInfo>,
    trips: &'a [NextTrip],
}

impl<'a> Board<'a> {
    #[must_use]
    pub const fn new(stop: Option<&'a StopInfo>, trips: &'a [NextTrip]) -> Self {
        Self { stop, trips }
    }
}

impl Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(stop) = self.stop {
            write!(f, "{} ({})", stop.stop_name, stop.stop_id)?;
            if let Some(platform) = &stop.platform_code {
                write!(f, " platform {platform}")?;
            }
            writeln!(f)?;
        }

        if self.trips.is_empty() {
            return writeln!(f, "No upcoming trips");
        }

        for trip in self.trips {
            let headsign: String = trip.trip_headsign.chars().take(HEADSIGN_WIDTH).collect();
            write!(
                f,
                "{:<5} {headsign:<width$} {:>8}",
                trip.route_short_name,
                trip.display_time(),
                width = HEADSIGN_WIDTH
            )?;
            writeln!(f, "  {}", status(trip))?;
        }
        Ok(())
    }
}

fn status(trip: &NextTrip) -> String {
    if !trip.is_realtime() {
        return "scheduled".to_string();
    }
    match trip.delay_minutes() {
        None | Some(0) => "on time".to_string(),
        Some(minutes) if minutes > 0 => format!("+{minutes} min"),
        Some(minutes) => format!("{minutes} min"),
    }
}

#[cfg(test)]
mod tests {
    use infobus_api::Envelope;
    use next_trips::NextTripsResponse;
    use pretty_assertions::assert_eq;

    use super::*;

    const NEXT_TRIPS: &[u8] = include_bytes!("../crates/next-trips/data/next-trips.json");

    fn response() -> NextTripsResponse {
        let body: serde_json::Value = serde_json::from_slice(NEXT_TRIPS).expect("valid json");
        Envelope::from(body).into_result().expect("should decode")
    }

    #[test]
    fn renders_trips() {
        let response = response();
        let board = Board::new(Some(&response.stop_info), &response.trips).to_string();

        let lines: Vec<_> = board.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Parada Central (1001) platform A");
        assert_eq!(lines[1], "1     Universidad              08:07:00  +2 min");
        assert_eq!(lines[2], "2     Hospital                 08:09:00  scheduled");
        assert_eq!(lines[3], "1     Universidad              08:20:00  scheduled");
    }

    #[test]
    fn no_trips() {
        let board = Board::new(None, &[]).to_string();
        assert_eq!(board, "No upcoming trips\n");
    }

    #[test]
    fn early_and_on_time() {
        let mut trip = response().trips.remove(0);
        trip.delay = Some(-90);
        assert_eq!(status(&trip), "-1 min");

        trip.delay = Some(20);
        assert_eq!(status(&trip), "on time");

        trip.delay = None;
        assert_eq!(status(&trip), "on time");

        trip.delay = Some(i64::MAX);
        assert_eq!(status(&trip), format!("+{} min", i64::MAX / 60));
    }
}
