use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use shared::error::{AppError, AppResult};

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking, BookingRoom,
    },
    enrollment::Enrollment,
    id::{BookingId, EnrollmentId, RoomId, TicketId, TicketTypeId, UserId},
    room::Room,
    ticket::{Ticket, TicketStatus, TicketType},
};
use crate::repository::{
    booking::BookingRepository, enrollment::EnrollmentRepository, room::RoomRepository,
    ticket::TicketRepository,
};
use crate::service::{booking::BookingService, eligibility::EligibilityVerifier};

// インメモリのフェイクリポジトリ。部屋と予約を単一の状態として共有する
#[derive(Default)]
struct FakeStore {
    bookings: Vec<Booking>,
    rooms: HashMap<RoomId, Room>,
    next_booking_id: i64,
}

struct FakeBookingRepository(Arc<Mutex<FakeStore>>);

#[async_trait]
impl BookingRepository for FakeBookingRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        let store = self.0.lock().unwrap();
        Ok(store
            .bookings
            .iter()
            .find(|b| b.booked_by == user_id)
            .cloned())
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Booking>> {
        let store = self.0.lock().unwrap();
        Ok(store
            .bookings
            .iter()
            .filter(|b| b.room.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let mut store = self.0.lock().unwrap();
        let room = store
            .rooms
            .get(&event.room_id)
            .cloned()
            .expect("room must be seeded before create");
        store.next_booking_id += 1;
        let booking_id = BookingId::new(store.next_booking_id);
        let now = Utc::now();
        store.bookings.push(Booking {
            booking_id,
            booked_by: event.booked_by,
            created_at: now,
            updated_at: now,
            room: booking_room(&room),
        });
        Ok(booking_id)
    }

    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()> {
        let mut store = self.0.lock().unwrap();
        let room = store
            .rooms
            .get(&event.room_id)
            .cloned()
            .expect("room must be seeded before update");
        let Some(booking) = store
            .bookings
            .iter_mut()
            .find(|b| b.booking_id == event.booking_id)
        else {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        };
        booking.room = booking_room(&room);
        booking.updated_at = Utc::now();
        Ok(())
    }
}

struct FakeRoomRepository(Arc<Mutex<FakeStore>>);

#[async_trait]
impl RoomRepository for FakeRoomRepository {
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let store = self.0.lock().unwrap();
        Ok(store.rooms.get(&room_id).cloned())
    }
}

struct FakeEnrollmentRepository(Option<Enrollment>);

#[async_trait]
impl EnrollmentRepository for FakeEnrollmentRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Enrollment>> {
        Ok(self.0.clone().filter(|e| e.user_id == user_id))
    }
}

struct FakeTicketRepository(Option<Ticket>);

#[async_trait]
impl TicketRepository for FakeTicketRepository {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AppResult<Option<Ticket>> {
        Ok(self.0.clone().filter(|t| t.enrollment_id == enrollment_id))
    }
}

fn booking_room(room: &Room) -> BookingRoom {
    BookingRoom {
        room_id: room.room_id,
        room_name: room.room_name.clone(),
        capacity: room.capacity,
        hotel_id: room.hotel_id,
    }
}

const USER_ID: i64 = 1;
const ENROLLMENT_ID: i64 = 10;

fn enrollment_for(user_id: UserId) -> Enrollment {
    Enrollment {
        enrollment_id: EnrollmentId::new(ENROLLMENT_ID),
        user_id,
    }
}

fn ticket(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
    Ticket {
        ticket_id: TicketId::new(100),
        enrollment_id: EnrollmentId::new(ENROLLMENT_ID),
        status,
        ticket_type: TicketType {
            ticket_type_id: TicketTypeId::new(200),
            is_remote,
            includes_hotel,
        },
    }
}

fn paid_hotel_ticket() -> Ticket {
    ticket(TicketStatus::Paid, false, true)
}

struct TestApp {
    state: Arc<Mutex<FakeStore>>,
    service: BookingService,
}

impl TestApp {
    fn new(enrollment: Option<Enrollment>, ticket: Option<Ticket>) -> Self {
        let state = Arc::new(Mutex::new(FakeStore::default()));
        let eligibility = EligibilityVerifier::new(
            Arc::new(FakeEnrollmentRepository(enrollment)),
            Arc::new(FakeTicketRepository(ticket)),
        );
        let service = BookingService::new(
            eligibility,
            Arc::new(FakeBookingRepository(state.clone())),
            Arc::new(FakeRoomRepository(state.clone())),
        );
        Self { state, service }
    }

    fn eligible() -> Self {
        Self::new(
            Some(enrollment_for(UserId::new(USER_ID))),
            Some(paid_hotel_ticket()),
        )
    }

    fn add_room(&self, room_id: i64, capacity: i32) -> RoomId {
        let room_id = RoomId::new(room_id);
        self.state.lock().unwrap().rooms.insert(
            room_id,
            Room {
                room_id,
                room_name: format!("room-{}", room_id),
                capacity,
                hotel_id: crate::model::id::HotelId::new(1),
            },
        );
        room_id
    }

    fn add_booking(&self, user_id: i64, room_id: RoomId) -> BookingId {
        let mut store = self.state.lock().unwrap();
        let room = store.rooms.get(&room_id).cloned().unwrap();
        store.next_booking_id += 1;
        let booking_id = BookingId::new(store.next_booking_id);
        let now = Utc::now();
        store.bookings.push(Booking {
            booking_id,
            booked_by: UserId::new(user_id),
            created_at: now,
            updated_at: now,
            room: booking_room(&room),
        });
        booking_id
    }
}

fn user() -> UserId {
    UserId::new(USER_ID)
}

#[tokio::test]
async fn every_operation_fails_with_not_found_without_enrollment() {
    let app = TestApp::new(None, Some(paid_hotel_ticket()));
    let room_id = app.add_room(1, 2);

    let err = app.service.get_booking(user()).await.unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));

    let err = app.service.save_booking(user(), room_id).await.unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));

    let err = app
        .service
        .update_booking(user(), room_id, BookingId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn every_operation_fails_without_a_qualifying_ticket() {
    let cases = [
        None,
        Some(ticket(TicketStatus::Reserved, false, true)),
        Some(ticket(TicketStatus::Paid, true, true)),
        Some(ticket(TicketStatus::Paid, false, false)),
    ];
    for ticket in cases {
        let app = TestApp::new(Some(enrollment_for(user())), ticket);
        let room_id = app.add_room(1, 2);

        let err = app.service.get_booking(user()).await.unwrap_err();
        assert!(matches!(err, AppError::CannotHaveBooking));

        let err = app.service.save_booking(user(), room_id).await.unwrap_err();
        assert!(matches!(err, AppError::CannotHaveBooking));

        let err = app
            .service
            .update_booking(user(), room_id, BookingId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CannotHaveBooking));
    }
}

#[tokio::test]
async fn get_booking_fails_with_not_found_when_user_has_no_booking() {
    let app = TestApp::eligible();

    let err = app.service.get_booking(user()).await.unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn get_booking_returns_booking_with_its_room() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 3);
    let booking_id = app.add_booking(USER_ID, room_id);

    let booking = app.service.get_booking(user()).await.unwrap();
    assert_eq!(booking.booking_id, booking_id);
    assert_eq!(booking.booked_by, user());
    assert_eq!(booking.room.room_id, room_id);
    assert_eq!(booking.room.capacity, 3);
}

#[tokio::test]
async fn save_booking_fails_when_user_already_has_a_booking() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 3);
    app.add_booking(USER_ID, room_id);
    let other_room_id = app.add_room(2, 3);

    let err = app
        .service
        .save_booking(user(), other_room_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation(reason) if reason == "A reservation already exists"));
}

#[tokio::test]
async fn save_booking_fails_with_not_found_for_unknown_room() {
    let app = TestApp::eligible();

    let err = app
        .service
        .save_booking(user(), RoomId::new(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn save_booking_fails_when_room_is_at_capacity() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 1);
    app.add_booking(42, room_id);

    let err = app.service.save_booking(user(), room_id).await.unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation(reason) if reason == "Room is full"));
}

#[tokio::test]
async fn save_booking_succeeds_while_room_has_vacancy() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 2);

    let booking_id = app.service.save_booking(user(), room_id).await.unwrap();

    let booking = app.service.get_booking(user()).await.unwrap();
    assert_eq!(booking.booking_id, booking_id);
    assert_eq!(booking.room.room_id, room_id);
}

// 定員 0 の部屋は「予約数 != 0 かつ予約数 == 定員」の判定に一度も該当しないため、
// 満室と見なされない（既存仕様の通り）
#[tokio::test]
async fn save_booking_never_treats_capacity_zero_room_as_full() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 0);

    assert!(app.service.save_booking(user(), room_id).await.is_ok());
}

#[tokio::test]
async fn update_booking_fails_when_user_has_no_booking() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 2);

    let err = app
        .service
        .update_booking(user(), room_id, BookingId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation(reason) if reason == "User does not have a reservation yet"));
}

#[tokio::test]
async fn update_booking_fails_with_not_found_for_unknown_room() {
    let app = TestApp::eligible();
    let room_id = app.add_room(1, 2);
    let booking_id = app.add_booking(USER_ID, room_id);

    let err = app
        .service
        .update_booking(user(), RoomId::new(999), booking_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn update_booking_fails_when_target_room_is_at_capacity() {
    let app = TestApp::eligible();
    let current_room_id = app.add_room(1, 2);
    let booking_id = app.add_booking(USER_ID, current_room_id);
    let full_room_id = app.add_room(2, 1);
    app.add_booking(42, full_room_id);

    let err = app
        .service
        .update_booking(user(), full_room_id, booking_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation(reason) if reason == "Room is full"));
}

#[tokio::test]
async fn update_booking_moves_the_booking_to_the_target_room() {
    let app = TestApp::eligible();
    let current_room_id = app.add_room(1, 2);
    let booking_id = app.add_booking(USER_ID, current_room_id);
    let target_room_id = app.add_room(2, 2);

    app.service
        .update_booking(user(), target_room_id, booking_id)
        .await
        .unwrap();

    let booking = app.service.get_booking(user()).await.unwrap();
    assert_eq!(booking.booking_id, booking_id);
    assert_eq!(booking.room.room_id, target_room_id);
}

// 満室判定は移動先の部屋に対して行う。元の部屋の占有は考慮しない
#[tokio::test]
async fn update_booking_checks_capacity_of_the_target_room_only() {
    let app = TestApp::eligible();
    let current_room_id = app.add_room(1, 1);
    let booking_id = app.add_booking(USER_ID, current_room_id);
    let target_room_id = app.add_room(2, 2);
    app.add_booking(42, target_room_id);

    assert!(app
        .service
        .update_booking(user(), target_room_id, booking_id)
        .await
        .is_ok());
}
