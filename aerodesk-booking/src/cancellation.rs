use aerodesk_core::models::Ticket;
use aerodesk_core::session::ActingSession;
use aerodesk_store::app_config::BusinessRules;
use aerodesk_store::{DbClient, FlightTx, TicketTx};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CancellationError {
    #[error("Ticket not found: {0}")]
    TicketNotFound(i64),

    #[error("You can only cancel your own tickets")]
    NotAuthorized,

    #[error("Cancellation was not confirmed")]
    NotConfirmed,

    #[error("Storage error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Caller's answer to the are-you-sure gate. Cancellation never
/// mutates anything without an explicit `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Removes tickets. Staff cancel anything; passengers only their own.
pub struct CancellationEngine {
    db: DbClient,
    restore_seat_on_cancel: bool,
}

impl CancellationEngine {
    pub fn new(db: DbClient, rules: &BusinessRules) -> Self {
        Self {
            db,
            restore_seat_on_cancel: rules.restore_seat_on_cancel,
        }
    }

    pub async fn cancel_ticket(
        &self,
        session: &ActingSession,
        ticket_id: i64,
        confirmation: Confirmation,
    ) -> Result<Ticket, CancellationError> {
        let mut tx = self.db.pool.begin().await?;

        // 1. The ticket must still exist.
        let ticket = TicketTx::get(&mut tx, ticket_id)
            .await?
            .ok_or(CancellationError::TicketNotFound(ticket_id))?;

        // 2. Ownership gate for non-staff sessions.
        if !session.role.is_privileged() && !owns_ticket(session, &ticket) {
            return Err(CancellationError::NotAuthorized);
        }

        // 3. Explicit yes/no gate before any mutation.
        if confirmation != Confirmation::Confirmed {
            return Err(CancellationError::NotConfirmed);
        }

        // 4. Delete, keeping the snapshot for the caller's acknowledgment.
        if TicketTx::delete(&mut tx, ticket_id).await? == 0 {
            return Err(CancellationError::TicketNotFound(ticket_id));
        }

        // 5. Seat restitution is a configured business rule; the flight
        //    reference is soft and may already be gone.
        if self.restore_seat_on_cancel && !FlightTx::release_seat(&mut tx, &ticket.flight_code).await?
        {
            warn!(
                flight = %ticket.flight_code,
                ticket_id,
                "cancelled ticket references a missing flight; seat not restored"
            );
        }

        tx.commit().await?;

        info!(
            ticket_id,
            flight = %ticket.flight_code,
            by = %session.username,
            "ticket cancelled"
        );

        Ok(ticket)
    }
}

/// A passenger owns a ticket when their linked passenger id matches the
/// ticket's stored id. Sessions without a linked id fall back to
/// matching their username against the stored id or the snapshotted
/// name. All comparisons are case-insensitive.
fn owns_ticket(session: &ActingSession, ticket: &Ticket) -> bool {
    match &session.passenger_id {
        Some(id) if !id.trim().is_empty() => id.eq_ignore_ascii_case(&ticket.passenger_id),
        _ => {
            session.username.eq_ignore_ascii_case(&ticket.passenger_id)
                || session.username.eq_ignore_ascii_case(&ticket.passenger_name)
        }
    }
}
