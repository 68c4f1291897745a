//! Rental terms shown before payment.

/// The built-in terms list.
pub fn default_terms() -> Vec<String> {
    [
        "The renter must hold a valid driving licence for the full rental period.",
        "The vehicle must be returned to the pick-up station by the booked end time.",
        "Late returns are charged at the hourly rate for every started hour.",
        "Fuel or charge level must match the level at pick-up.",
        "Damage and traffic fines incurred during the rental are the renter's responsibility.",
        "Unpaid bookings are released automatically when the hold expires.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
