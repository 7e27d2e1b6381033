//! Records and filters the scenarios submit, plus per-scenario booking setup.

use super::{ScenarioContext, ScenarioError};
use crate::assertions::assert_status;
use crate::booker_client::ClientError;
use crate::domain::{
    Booking, BookingDates, BookingFilter, BookingId, CreatedBooking, PartialBooking,
};
use chrono::NaiveDate;
use serde::Serialize;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The record every create call submits.
pub fn jim_brown() -> Booking {
    Booking {
        firstname: "Jim".into(),
        lastname: "Brown".into(),
        totalprice: 111,
        depositpaid: true,
        bookingdates: BookingDates {
            checkin: date(2018, 1, 1),
            checkout: date(2019, 1, 1),
        },
        additionalneeds: Some("Breakfast".into()),
    }
}

/// Full replacement used by the update scenario.
pub fn james_brown() -> Booking {
    Booking {
        firstname: "James".into(),
        ..jim_brown()
    }
}

pub fn name_patch() -> PartialBooking {
    PartialBooking {
        firstname: Some("James".into()),
        lastname: Some("Brown".into()),
        ..Default::default()
    }
}

pub fn date_range_filter() -> BookingFilter {
    BookingFilter::DateRange {
        checkin: date(2014, 3, 13),
        checkout: date(2014, 5, 21),
    }
}

pub fn name_filter() -> BookingFilter {
    BookingFilter::Name {
        firstname: "sally".into(),
        lastname: "brown".into(),
    }
}

/// JSON form of a record, for field-by-field comparison with a response.
pub fn expected_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ScenarioError> {
    serde_json::to_value(value)
        .map_err(ClientError::InvalidBody)
        .map_err(ScenarioError::from)
}

/// Create a booking owned by the calling scenario and return its id.
#[tracing::instrument(name = "Creating fixture booking", skip(ctx, booking))]
pub async fn create_fixture_booking(
    ctx: &ScenarioContext,
    booking: &Booking,
) -> Result<BookingId, ScenarioError> {
    let response = ctx.client().create_booking(booking).await?;
    assert_status(&response, 200)?;
    let created: CreatedBooking = response.json()?;
    tracing::debug!(booking_id = %created.bookingid, "Fixture booking created");
    Ok(created.bookingid)
}

/// Best-effort removal of a fixture booking once the scenario is done with it.
pub async fn discard_booking(ctx: &ScenarioContext, id: BookingId) {
    let Ok(token) = ctx.session() else {
        return;
    };
    match ctx.client().delete_booking(id, Some(token)).await {
        Ok(response) if response.ok() => {}
        Ok(response) => {
            tracing::warn!("Failed to discard booking {}: status {}", id, response.status())
        }
        Err(e) => tracing::warn!("Failed to discard booking {}: {:?}", id, e),
    }
}
