use crate::database::{model::booking::BookingRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // ユーザー ID に紐づく現在の予約を、部屋情報と一緒に取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT
                b.booking_id,
                b.user_id,
                b.created_at,
                b.updated_at,
                r.room_id,
                r.room_name,
                r.capacity,
                r.hotel_id
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
                ;
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Booking::from))
        .map_err(AppError::SpecificOperationError)
    }

    // 部屋 ID に紐づく予約の一覧を取得する
    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT
                b.booking_id,
                b.user_id,
                b.created_at,
                b.updated_at,
                r.room_id,
                r.room_name,
                r.capacity,
                r.hotel_id
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.room_id = $1
                ORDER BY b.created_at ASC
                ;
            "#,
        )
        .bind(room_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Booking::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    // 予約処理を行う、すなわち bookings テーブルにレコードを追加する
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        sqlx::query_scalar::<_, BookingId>(
            r#"
                INSERT INTO bookings (user_id, room_id)
                VALUES ($1, $2)
                RETURNING booking_id
                ;
            "#,
        )
        .bind(event.booked_by)
        .bind(event.room_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    // 該当予約 ID のレコードの部屋を付け替える
    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET
                    room_id = $2,
                    updated_at = NOW()
                WHERE booking_id = $1
                ;
            "#,
        )
        .bind(event.booking_id)
        .bind(event.room_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        Ok(())
    }
}
