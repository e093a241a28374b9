use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::types::coupon_types::{Coupon, CouponUpdate};
use crate::types::draw_types::{Draw, DrawUpdate};
use crate::types::result_types::DrawResult;
use crate::types::store_types::{Snapshot, StoreError};
use crate::types::ticket_types::TicketNumbers;
use crate::types::user_types::{NewUser, User, UserUpdate};

pub(crate) type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum Command {
    AddUser(NewUser, Reply<User>),
    GetUser(u64, Reply<User>),
    GetUserByEmail(String, Reply<User>),
    ListUsers(Reply<Vec<User>>),
    UpdateUser(u64, UserUpdate, Reply<User>),
    DeleteUser(u64, Reply<User>),

    CreateDraw(DateTime<Utc>, Reply<Draw>),
    GetDraw(u64, Reply<Draw>),
    ListDraws(Reply<Vec<Draw>>),
    UpdateDraw(u64, DrawUpdate, Reply<Draw>),
    DeleteDraw(u64, Reply<Draw>),

    CreateCoupon(u64, TicketNumbers, Vec<u64>, Reply<Coupon>),
    GetCoupon(u64, Reply<Coupon>),
    ListCoupons(Reply<Vec<Coupon>>),
    ListUserCoupons(u64, Reply<Vec<Coupon>>),
    UpdateCoupon(u64, CouponUpdate, Reply<Coupon>),
    DeleteCoupon(u64, Reply<Coupon>),
    CouponResults(u64, Reply<(Coupon, Vec<DrawResult>)>),

    Snapshot(Reply<Snapshot>),
    Restore(Snapshot, Reply<()>),
}
