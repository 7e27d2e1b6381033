use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// A booking record as the service stores it.
///
/// Field names follow the wire format of the booking service, which uses
/// lowercase run-together words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: u32,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialBookingDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<NaiveDate>,
}

/// Body of a partial update: only the fields that are set get sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialBooking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totalprice: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depositpaid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookingdates: Option<PartialBookingDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

impl PartialBooking {
    /// Apply the patch on top of `booking`, leaving unset fields untouched.
    pub fn apply_to(&self, booking: &Booking) -> Booking {
        let mut merged = booking.clone();
        if let Some(firstname) = &self.firstname {
            merged.firstname = firstname.clone();
        }
        if let Some(lastname) = &self.lastname {
            merged.lastname = lastname.clone();
        }
        if let Some(totalprice) = self.totalprice {
            merged.totalprice = totalprice;
        }
        if let Some(depositpaid) = self.depositpaid {
            merged.depositpaid = depositpaid;
        }
        if let Some(dates) = &self.bookingdates {
            if let Some(checkin) = dates.checkin {
                merged.bookingdates.checkin = checkin;
            }
            if let Some(checkout) = dates.checkout {
                merged.bookingdates.checkout = checkout;
            }
        }
        if let Some(additionalneeds) = &self.additionalneeds {
            merged.additionalneeds = Some(additionalneeds.clone());
        }
        merged
    }
}

/// Response of `POST /booking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBooking {
    pub bookingid: BookingId,
    pub booking: Booking,
}

/// One element of the booking id listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingIdEntry {
    pub bookingid: BookingId,
}
