mod booking;
mod booking_filter;

pub use booking::{
    Booking, BookingDates, BookingId, BookingIdEntry, CreatedBooking, PartialBooking,
    PartialBookingDates,
};
pub use booking_filter::BookingFilter;
