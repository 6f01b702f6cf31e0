use crate::model::id::{EnrollmentId, UserId};

// イベントへの参加登録。予約資格チェックの起点になる
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
}
