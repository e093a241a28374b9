use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};

use crate::store::lottery::commands::{Command, Reply};
use crate::types::coupon_types::{Coupon, CouponUpdate};
use crate::types::draw_types::{Draw, DrawUpdate};
use crate::types::result_types::DrawResult;
use crate::types::store_types::{Snapshot, StoreError};
use crate::types::ticket_types::TicketNumbers;
use crate::types::user_types::{NewUser, User, UserUpdate};

/// Cloneable handle to the lottery actor. Every call is one round trip
/// through the actor's command channel. Mutations return the stored value;
/// the matching `DbEvent` goes to the actor's sink.
#[derive(Clone)]
pub struct LotteryStore {
    pub(crate) tx: mpsc::Sender<Command>,
}

impl LotteryStore {
    pub(crate) fn new(tx: mpsc::Sender<Command>) -> Self {
        Self { tx }
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> Result<T, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(build(tx))
            .await
            .map_err(|_| StoreError::Unavailable)?;
        rx.await.unwrap_or(Err(StoreError::Unavailable))
    }

    pub async fn add_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.request(|tx| Command::AddUser(user, tx)).await
    }

    pub async fn get_user(&self, id: u64) -> Result<User, StoreError> {
        self.request(|tx| Command::GetUser(id, tx)).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let email = email.to_string();
        self.request(|tx| Command::GetUserByEmail(email, tx)).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.request(Command::ListUsers).await
    }

    pub async fn update_user(&self, id: u64, update: UserUpdate) -> Result<User, StoreError> {
        self.request(|tx| Command::UpdateUser(id, update, tx)).await
    }

    pub async fn delete_user(&self, id: u64) -> Result<User, StoreError> {
        self.request(|tx| Command::DeleteUser(id, tx)).await
    }

    pub async fn create_draw(&self, draw_date: DateTime<Utc>) -> Result<Draw, StoreError> {
        self.request(|tx| Command::CreateDraw(draw_date, tx)).await
    }

    pub async fn get_draw(&self, id: u64) -> Result<Draw, StoreError> {
        self.request(|tx| Command::GetDraw(id, tx)).await
    }

    pub async fn list_draws(&self) -> Result<Vec<Draw>, StoreError> {
        self.request(Command::ListDraws).await
    }

    pub async fn update_draw(&self, id: u64, update: DrawUpdate) -> Result<Draw, StoreError> {
        self.request(|tx| Command::UpdateDraw(id, update, tx)).await
    }

    pub async fn delete_draw(&self, id: u64) -> Result<Draw, StoreError> {
        self.request(|tx| Command::DeleteDraw(id, tx)).await
    }

    pub async fn create_coupon(
        &self,
        user_id: u64,
        numbers: TicketNumbers,
        draw_ids: Vec<u64>,
    ) -> Result<Coupon, StoreError> {
        self.request(|tx| Command::CreateCoupon(user_id, numbers, draw_ids, tx))
            .await
    }

    pub async fn get_coupon(&self, id: u64) -> Result<Coupon, StoreError> {
        self.request(|tx| Command::GetCoupon(id, tx)).await
    }

    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, StoreError> {
        self.request(Command::ListCoupons).await
    }

    pub async fn list_user_coupons(&self, user_id: u64) -> Result<Vec<Coupon>, StoreError> {
        self.request(|tx| Command::ListUserCoupons(user_id, tx)).await
    }

    pub async fn update_coupon(
        &self,
        id: u64,
        update: CouponUpdate,
    ) -> Result<Coupon, StoreError> {
        self.request(|tx| Command::UpdateCoupon(id, update, tx)).await
    }

    pub async fn delete_coupon(&self, id: u64) -> Result<Coupon, StoreError> {
        self.request(|tx| Command::DeleteCoupon(id, tx)).await
    }

    pub async fn coupon_results(&self, id: u64) -> Result<(Coupon, Vec<DrawResult>), StoreError> {
        self.request(|tx| Command::CouponResults(id, tx)).await
    }

    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.request(Command::Snapshot).await
    }

    pub async fn restore(&self, snapshot: Snapshot) -> Result<(), StoreError> {
        self.request(|tx| Command::Restore(snapshot, tx)).await
    }
}
