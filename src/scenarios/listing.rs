use super::fixtures::{date_range_filter, name_filter};
use super::{Group, Scenario, ScenarioContext, ScenarioError, Tag};
use crate::assertions::{assert_each_element_has_integer, assert_ok, assert_status};
use crate::domain::BookingFilter;

async fn list_booking_ids(
    ctx: &ScenarioContext,
    filter: &BookingFilter,
) -> Result<(), ScenarioError> {
    let response = ctx.client().get_booking_ids(filter).await?;
    assert_ok(&response)?;
    assert_status(&response, 200)?;

    let body = response.json_value()?;
    tracing::debug!(
        listed = body.as_array().map(Vec::len).unwrap_or_default(),
        "Listed booking ids"
    );
    assert_each_element_has_integer(&body, "bookingid")?;
    Ok(())
}

pub struct GetBookingIds;

#[async_trait::async_trait]
impl Scenario for GetBookingIds {
    fn name(&self) -> &'static str {
        "Booking - GetBookingIds"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        list_booking_ids(ctx, &BookingFilter::All).await
    }
}

pub struct FilterBookingIdsByDate;

#[async_trait::async_trait]
impl Scenario for FilterBookingIdsByDate {
    fn name(&self) -> &'static str {
        "Booking - GetBookingIds Filter by checkin/checkout date"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        list_booking_ids(ctx, &date_range_filter()).await
    }
}

pub struct FilterBookingIdsByName;

#[async_trait::async_trait]
impl Scenario for FilterBookingIdsByName {
    fn name(&self) -> &'static str {
        "Booking - GetBookingIds Filter by name"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        list_booking_ids(ctx, &name_filter()).await
    }
}
