use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::model::{id::UserId, ticket::TicketStatus};
use crate::repository::{enrollment::EnrollmentRepository, ticket::TicketRepository};

/// ユーザーが宿泊予約を保持できるかどうかを判定するゲート。
/// 予約の参照・作成・更新いずれの操作でも、必ず最初に呼び出す。
#[derive(new)]
pub struct EligibilityVerifier {
    enrollment_repository: Arc<dyn EnrollmentRepository>,
    ticket_repository: Arc<dyn TicketRepository>,
}

impl EligibilityVerifier {
    pub async fn verify(&self, user_id: UserId) -> AppResult<()> {
        let enrollment = self
            .enrollment_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "ユーザー（{}）の参加登録が見つかりませんでした。",
                    user_id
                ))
            })?;

        let Some(ticket) = self
            .ticket_repository
            .find_by_enrollment_id(enrollment.enrollment_id)
            .await?
        else {
            return Err(AppError::CannotHaveBooking);
        };

        // 未入金（RESERVED）・リモート参加・宿泊なしのチケットでは予約を持てない
        if ticket.status == TicketStatus::Reserved
            || ticket.ticket_type.is_remote
            || !ticket.ticket_type.includes_hotel
        {
            return Err(AppError::CannotHaveBooking);
        }

        Ok(())
    }
}
