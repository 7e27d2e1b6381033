use crate::fake_booker::{Quirks, SEEDED_ID};
use crate::helpers::{spawn_app, spawn_app_with};
use booker_suite::assertions::AssertionError;
use booker_suite::domain::{BookingId, BookingIdEntry};
use booker_suite::scenarios::fixtures::{date_range_filter, name_filter};
use booker_suite::scenarios::{
    FilterBookingIdsByDate, FilterBookingIdsByName, GetBookingIds, ScenarioError,
};
use claims::{assert_matches, assert_ok};

#[tokio::test]
async fn listing_scenarios_pass() {
    let app = spawn_app().await;

    assert_ok!(app.run(&GetBookingIds).await);
    assert_ok!(app.run(&FilterBookingIdsByDate).await);
    assert_ok!(app.run(&FilterBookingIdsByName).await);
}

#[tokio::test]
async fn filters_are_sent_as_query_parameters() {
    let app = spawn_app().await;

    for filter in [name_filter(), date_range_filter()] {
        let response = app.client.get_booking_ids(&filter).await.unwrap();
        let ids: Vec<BookingIdEntry> = response.json().unwrap();

        assert_eq!(
            ids,
            vec![BookingIdEntry {
                bookingid: BookingId(SEEDED_ID)
            }]
        );
    }
}

#[tokio::test]
async fn non_integer_booking_ids_fail_the_listing() {
    let app = spawn_app_with(Quirks {
        string_ids: true,
        ..Default::default()
    })
    .await;

    let outcome = app.run(&GetBookingIds).await;

    assert_matches!(
        outcome,
        Err(ScenarioError::Assertion(AssertionError::WrongType {
            expected_type: "an integer",
            ..
        }))
    );
}
