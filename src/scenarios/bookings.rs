use super::fixtures::{create_fixture_booking, expected_json, jim_brown};
use super::{Group, Scenario, ScenarioContext, ScenarioError, Tag};
use crate::assertions::{assert_fields_match, assert_has_property, assert_ok, assert_status};
use crate::domain::BookingId;

const BOOKING_FIELDS: [&str; 7] = [
    "firstname",
    "lastname",
    "totalprice",
    "depositpaid",
    "bookingdates.checkin",
    "bookingdates.checkout",
    "additionalneeds",
];

// Far beyond anything the service hands out.
const UNKNOWN_BOOKING_ID: BookingId = BookingId(999_999_999);

pub struct GetBooking;

#[async_trait::async_trait]
impl Scenario for GetBooking {
    fn name(&self) -> &'static str {
        "Booking - GetBooking"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let id = create_fixture_booking(ctx, &jim_brown()).await?;

        let response = ctx.client().get_booking(id).await?;
        assert_ok(&response)?;
        assert_status(&response, 200)?;

        let body = response.json_value()?;
        for field in BOOKING_FIELDS {
            assert_has_property(&body, field)?;
        }
        Ok(())
    }
}

pub struct GetUnknownBooking;

#[async_trait::async_trait]
impl Scenario for GetUnknownBooking {
    fn name(&self) -> &'static str {
        "Booking - GetBooking unknown id"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking, Tag::Negative]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let response = ctx.client().get_booking(UNKNOWN_BOOKING_ID).await?;
        assert_status(&response, 404)?;
        Ok(())
    }
}

pub struct CreateBooking;

#[async_trait::async_trait]
impl Scenario for CreateBooking {
    fn name(&self) -> &'static str {
        "Booking - CreateBooking"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let booking = jim_brown();
        let response = ctx.client().create_booking(&booking).await?;
        assert_ok(&response)?;
        assert_status(&response, 200)?;

        let body = response.json_value()?;
        assert_has_property(&body, "bookingid")?;
        let created = assert_has_property(&body, "booking")?;
        assert_fields_match(created, &expected_json(&booking)?)?;
        Ok(())
    }
}

/// Whatever was submitted comes back unchanged from a fetch by the new id.
pub struct CreateThenFetchBooking;

#[async_trait::async_trait]
impl Scenario for CreateThenFetchBooking {
    fn name(&self) -> &'static str {
        "Booking - CreateBooking then GetBooking"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let booking = jim_brown();
        let id = create_fixture_booking(ctx, &booking).await?;

        let response = ctx.client().get_booking(id).await?;
        assert_status(&response, 200)?;
        assert_fields_match(&response.json_value()?, &expected_json(&booking)?)?;
        Ok(())
    }
}
