use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
    room::Room,
};
use crate::repository::{booking::BookingRepository, room::RoomRepository};
use crate::service::eligibility::EligibilityVerifier;

#[derive(new)]
pub struct BookingService {
    eligibility: EligibilityVerifier,
    booking_repository: Arc<dyn BookingRepository>,
    room_repository: Arc<dyn RoomRepository>,
}

impl BookingService {
    // ユーザーの現在の予約を、部屋情報込みで取得する
    pub async fn get_booking(&self, user_id: UserId) -> AppResult<Booking> {
        self.eligibility.verify(user_id).await?;

        self.booking_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "ユーザー（{}）の予約が見つかりませんでした。",
                    user_id
                ))
            })
    }

    // 予約を新規作成し、採番された予約 ID を返す
    pub async fn save_booking(&self, user_id: UserId, room_id: RoomId) -> AppResult<BookingId> {
        self.eligibility.verify(user_id).await?;

        if self
            .booking_repository
            .find_by_user_id(user_id)
            .await?
            .is_some()
        {
            return Err(AppError::ForbiddenOperation(
                "A reservation already exists".into(),
            ));
        }

        let room = self.find_room(room_id).await?;
        self.ensure_room_has_vacancy(&room).await?;

        self.booking_repository
            .create(CreateBooking::new(user_id, room_id))
            .await
    }

    // 既存予約の部屋を付け替える。
    // booking_id が user_id 本人の予約かどうかはここでは検証しない（既存仕様）。
    pub async fn update_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
        booking_id: BookingId,
    ) -> AppResult<()> {
        self.eligibility.verify(user_id).await?;

        if self
            .booking_repository
            .find_by_user_id(user_id)
            .await?
            .is_none()
        {
            return Err(AppError::ForbiddenOperation(
                "User does not have a reservation yet".into(),
            ));
        }

        let room = self.find_room(room_id).await?;
        self.ensure_room_has_vacancy(&room).await?;

        self.booking_repository
            .update_room(UpdateBookingRoom::new(booking_id, room_id))
            .await
    }

    async fn find_room(&self, room_id: RoomId) -> AppResult<Room> {
        self.room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("部屋（{}）が見つかりませんでした。", room_id))
            })
    }

    // 満室判定。「予約数が 0 でなく、かつ定員とちょうど等しい」ときのみ満室とする。
    // 予約数は判定時点のスナップショットで、書き込みとは別ステートメントになる
    async fn ensure_room_has_vacancy(&self, room: &Room) -> AppResult<()> {
        let occupants = self.booking_repository.find_by_room_id(room.room_id).await?;
        if !occupants.is_empty() && occupants.len() == room.capacity as usize {
            return Err(AppError::ForbiddenOperation("Room is full".into()));
        }
        Ok(())
    }
}
