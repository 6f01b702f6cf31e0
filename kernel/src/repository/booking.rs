use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{RoomId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::BookingId;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // ユーザー ID に紐づく現在の予約を取得する（1 ユーザー 1 予約）
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>>;
    // 部屋 ID に紐づく予約の一覧を取得する（満室判定に使う）
    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Booking>>;
    // 予約を新規作成する
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    // 既存予約の部屋を付け替える
    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()>;
}
