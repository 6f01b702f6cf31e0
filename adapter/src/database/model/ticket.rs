use kernel::model::{
    id::{EnrollmentId, TicketId, TicketTypeId},
    ticket::{Ticket, TicketStatus, TicketType},
};
use shared::error::AppError;

// チケットをチケット種別と INNER JOIN して取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct TicketWithTypeRow {
    pub ticket_id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: String,
    pub ticket_type_id: TicketTypeId,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl TryFrom<TicketWithTypeRow> for Ticket {
    type Error = AppError;

    fn try_from(value: TicketWithTypeRow) -> Result<Self, Self::Error> {
        let TicketWithTypeRow {
            ticket_id,
            enrollment_id,
            status,
            ticket_type_id,
            is_remote,
            includes_hotel,
        } = value;
        let status = status
            .parse::<TicketStatus>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Ticket {
            ticket_id,
            enrollment_id,
            status,
            ticket_type: TicketType {
                ticket_type_id,
                is_remote,
                includes_hotel,
            },
        })
    }
}
