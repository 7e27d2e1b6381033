use crate::fake_booker::Quirks;
use crate::helpers::{spawn_app, spawn_app_with};
use booker_suite::assertions::AssertionError;
use booker_suite::scenarios::{
    DeleteBooking, DeletedBookingIsGone, MutationsWithoutTokenAreRejected, PartialUpdateBooking,
    PartialUpdateKeepsOtherFields, ScenarioError, UpdateBooking,
};
use claims::{assert_matches, assert_ok};

#[tokio::test]
async fn authenticated_scenarios_pass() {
    let app = spawn_app().await;

    assert_ok!(app.run(&UpdateBooking).await);
    assert_ok!(app.run(&PartialUpdateBooking).await);
    assert_ok!(app.run(&PartialUpdateKeepsOtherFields).await);
    assert_ok!(app.run(&DeleteBooking).await);
    assert_ok!(app.run(&DeletedBookingIsGone).await);
}

#[tokio::test]
async fn authenticated_scenarios_clean_up_their_fixtures() {
    let app = spawn_app().await;
    let before = app.booker.booking_count();

    assert_ok!(app.run(&UpdateBooking).await);
    assert_ok!(app.run(&PartialUpdateBooking).await);
    assert_ok!(app.run(&DeleteBooking).await);

    assert_eq!(app.booker.booking_count(), before);
}

#[tokio::test]
async fn mutations_without_a_token_are_rejected() {
    let app = spawn_app().await;

    assert_ok!(app.run(&MutationsWithoutTokenAreRejected).await);
}

#[tokio::test]
async fn a_service_ignoring_the_token_is_caught() {
    let app = spawn_app_with(Quirks {
        ignore_auth: true,
        ..Default::default()
    })
    .await;

    let outcome = app.run(&MutationsWithoutTokenAreRejected).await;

    assert_matches!(
        outcome,
        Err(ScenarioError::Assertion(AssertionError::NotRejected { actual: 200 }))
    );
}

#[tokio::test]
async fn only_the_preservation_scenario_notices_a_clobbering_patch() {
    let app = spawn_app_with(Quirks {
        patch_resets_price: true,
        ..Default::default()
    })
    .await;

    // Untouched fields are only checked for presence here
    assert_ok!(app.run(&PartialUpdateBooking).await);

    let outcome = app.run(&PartialUpdateKeepsOtherFields).await;
    assert_matches!(
        outcome,
        Err(ScenarioError::Assertion(AssertionError::ValueMismatch { ref path, .. })) if path == "totalprice"
    );
}

#[tokio::test]
async fn a_booking_surviving_its_deletion_is_caught() {
    let app = spawn_app_with(Quirks {
        keep_deleted: true,
        ..Default::default()
    })
    .await;

    // The delete call itself still looks fine
    assert_ok!(app.run(&DeleteBooking).await);

    let outcome = app.run(&DeletedBookingIsGone).await;
    assert_matches!(
        outcome,
        Err(ScenarioError::Assertion(AssertionError::UnexpectedStatus {
            expected: 404,
            actual: 200
        }))
    );
}

#[tokio::test]
async fn a_failing_scenario_still_discards_its_fixture() {
    let app = spawn_app_with(Quirks {
        patch_resets_price: true,
        ..Default::default()
    })
    .await;
    let before = app.booker.booking_count();

    let outcome = app.run(&PartialUpdateKeepsOtherFields).await;

    assert_matches!(outcome, Err(ScenarioError::Assertion(_)));
    assert_eq!(app.booker.booking_count(), before);
}
