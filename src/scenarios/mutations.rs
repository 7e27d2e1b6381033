use super::fixtures::{
    create_fixture_booking, discard_booking, expected_json, james_brown, jim_brown, name_patch,
};
use super::{Group, Scenario, ScenarioContext, ScenarioError, Tag};
use crate::assertions::{
    assert_fields_match, assert_has_property, assert_ok, assert_property_eq, assert_rejected,
    assert_status, assert_status_text,
};

const UNPATCHED_FIELDS: [&str; 6] = [
    "totalprice",
    "depositpaid",
    "bookingdates",
    "bookingdates.checkin",
    "bookingdates.checkout",
    "additionalneeds",
];

pub struct UpdateBooking;

#[async_trait::async_trait]
impl Scenario for UpdateBooking {
    fn name(&self) -> &'static str {
        "Booking - UpdateBooking"
    }

    fn group(&self) -> Group {
        Group::WithAuth
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Auth]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let id = create_fixture_booking(ctx, &jim_brown()).await?;
        let update = james_brown();

        let checks: Result<(), ScenarioError> = async {
            let response = ctx
                .client()
                .update_booking(id, &update, Some(ctx.session()?))
                .await?;
            assert_ok(&response)?;
            assert_status(&response, 200)?;
            assert_fields_match(&response.json_value()?, &expected_json(&update)?)?;
            Ok(())
        }
        .await;

        discard_booking(ctx, id).await;
        checks
    }
}

/// Patched fields are echoed back; the rest only has to be present.
pub struct PartialUpdateBooking;

#[async_trait::async_trait]
impl Scenario for PartialUpdateBooking {
    fn name(&self) -> &'static str {
        "Booking - PartialUpdateBooking"
    }

    fn group(&self) -> Group {
        Group::WithAuth
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Auth]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let id = create_fixture_booking(ctx, &jim_brown()).await?;
        let patch = name_patch();

        let checks: Result<(), ScenarioError> = async {
            let response = ctx
                .client()
                .partial_update_booking(id, &patch, Some(ctx.session()?))
                .await?;
            assert_ok(&response)?;
            assert_status(&response, 200)?;

            let body = response.json_value()?;
            assert_property_eq(&body, "firstname", patch.firstname.clone())?;
            assert_property_eq(&body, "lastname", patch.lastname.clone())?;
            for field in UNPATCHED_FIELDS {
                assert_has_property(&body, field)?;
            }
            Ok(())
        }
        .await;

        discard_booking(ctx, id).await;
        checks
    }
}

/// Fields left out of a patch keep the values they had before it.
pub struct PartialUpdateKeepsOtherFields;

#[async_trait::async_trait]
impl Scenario for PartialUpdateKeepsOtherFields {
    fn name(&self) -> &'static str {
        "Booking - PartialUpdateBooking keeps other fields"
    }

    fn group(&self) -> Group {
        Group::WithAuth
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Auth]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let original = jim_brown();
        let id = create_fixture_booking(ctx, &original).await?;
        let patch = name_patch();
        let expected = expected_json(&patch.apply_to(&original))?;

        let checks: Result<(), ScenarioError> = async {
            let response = ctx
                .client()
                .partial_update_booking(id, &patch, Some(ctx.session()?))
                .await?;
            assert_status(&response, 200)?;
            assert_fields_match(&response.json_value()?, &expected)?;

            let response = ctx.client().get_booking(id).await?;
            assert_status(&response, 200)?;
            assert_fields_match(&response.json_value()?, &expected)?;
            Ok(())
        }
        .await;

        discard_booking(ctx, id).await;
        checks
    }
}

pub struct DeleteBooking;

#[async_trait::async_trait]
impl Scenario for DeleteBooking {
    fn name(&self) -> &'static str {
        "Booking - DeleteBooking"
    }

    fn group(&self) -> Group {
        Group::WithAuth
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Auth]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let id = create_fixture_booking(ctx, &jim_brown()).await?;

        let response = ctx.client().delete_booking(id, Some(ctx.session()?)).await?;
        assert_status(&response, 201)?;
        assert_status_text(&response, "Created")?;
        Ok(())
    }
}

pub struct DeletedBookingIsGone;

#[async_trait::async_trait]
impl Scenario for DeletedBookingIsGone {
    fn name(&self) -> &'static str {
        "Booking - DeleteBooking then GetBooking"
    }

    fn group(&self) -> Group {
        Group::WithAuth
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Auth]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let id = create_fixture_booking(ctx, &jim_brown()).await?;

        let response = ctx.client().delete_booking(id, Some(ctx.session()?)).await?;
        assert_status(&response, 201)?;

        let response = ctx.client().get_booking(id).await?;
        assert_status(&response, 404)?;
        Ok(())
    }
}

/// PUT, PATCH and DELETE without a session cookie are refused and leave the
/// booking in place.
pub struct MutationsWithoutTokenAreRejected;

#[async_trait::async_trait]
impl Scenario for MutationsWithoutTokenAreRejected {
    fn name(&self) -> &'static str {
        "Booking - Mutations without token"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking, Tag::Negative]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let original = jim_brown();
        let id = create_fixture_booking(ctx, &original).await?;
        let client = ctx.client();

        assert_rejected(&client.update_booking(id, &james_brown(), None).await?)?;
        assert_rejected(&client.partial_update_booking(id, &name_patch(), None).await?)?;
        assert_rejected(&client.delete_booking(id, None).await?)?;

        let response = client.get_booking(id).await?;
        assert_status(&response, 200)?;
        assert_fields_match(&response.json_value()?, &expected_json(&original)?)?;
        Ok(())
    }
}
