use kernel::model::{
    booking::{Booking, BookingRoom},
    id::{BookingId, HotelId, RoomId, UserId},
};
use sqlx::types::chrono::{DateTime, Utc};

// 予約を部屋と INNER JOIN して取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub hotel_id: HotelId,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            user_id,
            created_at,
            updated_at,
            room_id,
            room_name,
            capacity,
            hotel_id,
        } = value;
        Booking {
            booking_id,
            booked_by: user_id,
            created_at,
            updated_at,
            room: BookingRoom {
                room_id,
                room_name,
                capacity,
                hotel_id,
            },
        }
    }
}
