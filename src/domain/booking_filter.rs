use chrono::NaiveDate;

/// Query narrowing the booking id listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingFilter {
    All,
    DateRange {
        checkin: NaiveDate,
        checkout: NaiveDate,
    },
    Name {
        firstname: String,
        lastname: String,
    },
}

impl BookingFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            BookingFilter::All => Vec::new(),
            BookingFilter::DateRange { checkin, checkout } => vec![
                ("checkin", checkin.format("%Y-%m-%d").to_string()),
                ("checkout", checkout.format("%Y-%m-%d").to_string()),
            ],
            BookingFilter::Name {
                firstname,
                lastname,
            } => vec![("firstname", firstname.clone()), ("lastname", lastname.clone())],
        }
    }
}
