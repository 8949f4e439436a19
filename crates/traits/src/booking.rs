//! The Booking & Reservation Engine: ticket issuance, optional seat
//! reservation under a row lock, and purchase history lookup.

use model::{PurchaseRecord, Ticket, TicketId, TripId};
use store::{ReservationRepo, TicketRepo, TripRepo, UserRepo};
use utility::time::minutes_between;

use crate::error::{Result, TraitsError};

fn connection_price(leg: &model::TripLeg) -> i64 {
    let minutes = minutes_between(
        leg.date.and_time(leg.start_time),
        leg.date.and_time(leg.end_time),
    );
    minutes.div_euclid(2) + 2
}

/// Issues a ticket for `trip_id` to `user_email`, optionally reserving a
/// seat. Returns the ticket id uniformly, whether or not a seat was
/// reserved.
pub async fn buy_ticket<D>(
    ops: &mut D,
    user_email: &str,
    trip_id: TripId,
    booking_time: chrono::NaiveDateTime,
    also_reserve_seats: bool,
) -> Result<TicketId>
where
    D: UserRepo + TicketRepo + ReservationRepo + TripRepo,
{
    if !UserRepo::exists(ops, user_email).await? {
        return Err(TraitsError::NotFound);
    }

    let leg = TripRepo::get(ops, trip_id).await?;
    // The BEFORE-INSERT trigger recomputes this from the trip's duration
    // in the real backend; it is computed here too so the in-memory test
    // double returns the same value without a trigger to rely on.
    let price = connection_price(&leg);

    let ticket_id = TicketRepo::insert(
        ops,
        Ticket {
            user_email: user_email.to_string(),
            trip_id,
            booking_time,
            reserved_seat: also_reserve_seats,
            price,
        },
    )
    .await?;

    if also_reserve_seats {
        let (_, capacity) = TicketRepo::train_capacity_for_trip(ops, trip_id)
            .await?
            .ok_or(TraitsError::NotFound)?;
        let reserved = ReservationRepo::count_for_update(ops, trip_id).await?;
        if reserved >= capacity {
            return Err(TraitsError::invalid("capacity exhausted for this trip"));
        }
        ReservationRepo::insert(ops, model::Reservation { ticket_id }).await?;
    }

    Ok(ticket_id)
}

pub async fn purchase_history<D>(ops: &mut D, email: &str) -> Result<Vec<PurchaseRecord>>
where
    D: TicketRepo,
{
    Ok(TicketRepo::purchase_history(ops, email).await?)
}
