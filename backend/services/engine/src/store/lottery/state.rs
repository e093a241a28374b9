use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::store::results::ticket_results;
use crate::types::coupon_types::{Coupon, CouponUpdate};
use crate::types::db_event_types::{
    CouponDeletedEvent, CouponWrittenEvent, DbEvent, DrawCreatedEvent, DrawDeletedEvent,
    DrawUpdatedEvent, UserCreatedEvent, UserDeletedEvent, UserUpdatedEvent,
};
use crate::types::draw_types::{Draw, DrawUpdate};
use crate::types::result_types::DrawResult;
use crate::types::store_types::{IdWatermarks, Snapshot, StoreError};
use crate::types::ticket_types::TicketNumbers;
use crate::types::user_types::{NewUser, User, UserUpdate};

/// A stored value together with the event describing how it was written.
pub(crate) type Written<T> = (T, DbEvent);

#[derive(Debug, Default)]
pub(crate) struct LotteryState {
    users: BTreeMap<u64, User>,
    draws: BTreeMap<u64, Draw>,
    coupons: BTreeMap<u64, Coupon>,
    last_user_id: u64,
    last_draw_id: u64,
    last_coupon_id: u64,
}

fn next_id(last: &mut u64) -> u64 {
    *last += 1;
    *last
}

fn highest_key<V>(map: &BTreeMap<u64, V>) -> u64 {
    map.keys().next_back().copied().unwrap_or(0)
}

fn coupon_written(coupon: &Coupon) -> CouponWrittenEvent {
    CouponWrittenEvent {
        coupon_id: coupon.id,
        user_id: coupon.user_id,
        numbers: coupon.numbers.to_vec(),
        draw_ids: coupon.draw_ids.clone(),
        created_at: coupon.created_at,
    }
}

fn dedup_draw_ids(mut draw_ids: Vec<u64>) -> Vec<u64> {
    draw_ids.sort_unstable();
    draw_ids.dedup();
    draw_ids
}

impl LotteryState {
    fn email_owner(&self, email: &str) -> Option<u64> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.id)
    }

    fn require_draws(&self, draw_ids: &[u64], allow_completed: bool) -> Result<(), StoreError> {
        if draw_ids.is_empty() {
            return Err(StoreError::NoDraws);
        }
        for id in draw_ids {
            let draw = self.draws.get(id).ok_or(StoreError::DrawNotFound(*id))?;
            if !allow_completed && draw.is_completed() {
                return Err(StoreError::DrawCompleted(*id));
            }
        }
        Ok(())
    }

    pub fn add_user(&mut self, new_user: NewUser) -> Result<Written<User>, StoreError> {
        if self.email_owner(&new_user.email).is_some() {
            return Err(StoreError::EmailTaken);
        }

        let user = User {
            id: next_id(&mut self.last_user_id),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());

        let event = DbEvent::UserCreated(UserCreatedEvent {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
        });
        Ok((user, event))
    }

    pub fn get_user(&self, id: u64) -> Result<User, StoreError> {
        self.users.get(&id).cloned().ok_or(StoreError::UserNotFound)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.email_owner(email)
            .and_then(|id| self.users.get(&id))
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    pub fn list_users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn update_user(&mut self, id: u64, update: UserUpdate) -> Result<Written<User>, StoreError> {
        if !self.users.contains_key(&id) {
            return Err(StoreError::UserNotFound);
        }
        if let Some(email) = &update.email {
            if self.email_owner(email).is_some_and(|owner| owner != id) {
                return Err(StoreError::EmailTaken);
            }
        }

        let user = self.users.get_mut(&id).ok_or(StoreError::UserNotFound)?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }

        let event = DbEvent::UserUpdated(UserUpdatedEvent {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            timestamp: Utc::now(),
        });
        Ok((user.clone(), event))
    }

    /// Removes the user along with every coupon they own.
    pub fn delete_user(&mut self, id: u64) -> Result<Written<User>, StoreError> {
        let user = self.users.remove(&id).ok_or(StoreError::UserNotFound)?;
        self.coupons.retain(|_, coupon| coupon.user_id != id);

        let event = DbEvent::UserDeleted(UserDeletedEvent {
            user_id: id,
            timestamp: Utc::now(),
        });
        Ok((user, event))
    }

    pub fn create_draw(&mut self, draw_date: DateTime<Utc>) -> Written<Draw> {
        let draw = Draw {
            id: next_id(&mut self.last_draw_id),
            draw_date,
            winning_numbers: None,
            created_at: Utc::now(),
        };
        self.draws.insert(draw.id, draw.clone());

        let event = DbEvent::DrawCreated(DrawCreatedEvent {
            draw_id: draw.id,
            draw_date: draw.draw_date,
            created_at: draw.created_at,
        });
        (draw, event)
    }

    pub fn get_draw(&self, id: u64) -> Result<Draw, StoreError> {
        self.draws.get(&id).cloned().ok_or(StoreError::DrawNotFound(id))
    }

    pub fn list_draws(&self) -> Vec<Draw> {
        self.draws.values().cloned().collect()
    }

    pub fn update_draw(&mut self, id: u64, update: DrawUpdate) -> Result<Written<Draw>, StoreError> {
        let draw = self.draws.get_mut(&id).ok_or(StoreError::DrawNotFound(id))?;
        if let Some(draw_date) = update.draw_date {
            draw.draw_date = draw_date;
        }
        if let Some(winning_numbers) = update.winning_numbers {
            draw.winning_numbers = Some(winning_numbers);
        }

        let event = DbEvent::DrawUpdated(DrawUpdatedEvent {
            draw_id: draw.id,
            draw_date: draw.draw_date,
            winning_numbers: draw.winning_numbers.as_ref().map(TicketNumbers::to_vec),
            timestamp: Utc::now(),
        });
        Ok((draw.clone(), event))
    }

    /// Removes the draw and detaches it from every coupon that referenced it.
    pub fn delete_draw(&mut self, id: u64) -> Result<Written<Draw>, StoreError> {
        let draw = self.draws.remove(&id).ok_or(StoreError::DrawNotFound(id))?;
        for coupon in self.coupons.values_mut() {
            coupon.draw_ids.retain(|draw_id| *draw_id != id);
        }

        let event = DbEvent::DrawDeleted(DrawDeletedEvent {
            draw_id: id,
            timestamp: Utc::now(),
        });
        Ok((draw, event))
    }

    pub fn create_coupon(
        &mut self,
        user_id: u64,
        numbers: TicketNumbers,
        draw_ids: Vec<u64>,
    ) -> Result<Written<Coupon>, StoreError> {
        if !self.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound);
        }
        let draw_ids = dedup_draw_ids(draw_ids);
        self.require_draws(&draw_ids, false)?;

        let coupon = Coupon {
            id: next_id(&mut self.last_coupon_id),
            user_id,
            numbers,
            draw_ids,
            created_at: Utc::now(),
        };
        self.coupons.insert(coupon.id, coupon.clone());

        let event = DbEvent::CouponCreated(coupon_written(&coupon));
        Ok((coupon, event))
    }

    pub fn get_coupon(&self, id: u64) -> Result<Coupon, StoreError> {
        self.coupons.get(&id).cloned().ok_or(StoreError::CouponNotFound)
    }

    pub fn list_coupons(&self) -> Vec<Coupon> {
        self.coupons.values().cloned().collect()
    }

    pub fn list_user_coupons(&self, user_id: u64) -> Vec<Coupon> {
        self.coupons
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Administrative edit. Unlike a purchase, completed draws may be attached.
    pub fn update_coupon(&mut self, id: u64, update: CouponUpdate) -> Result<Written<Coupon>, StoreError> {
        if !self.coupons.contains_key(&id) {
            return Err(StoreError::CouponNotFound);
        }
        if let Some(user_id) = update.user_id {
            if !self.users.contains_key(&user_id) {
                return Err(StoreError::UserNotFound);
            }
        }
        let draw_ids = update.draw_ids.map(dedup_draw_ids);
        if let Some(draw_ids) = &draw_ids {
            self.require_draws(draw_ids, true)?;
        }

        let coupon = self.coupons.get_mut(&id).ok_or(StoreError::CouponNotFound)?;
        if let Some(numbers) = update.numbers {
            coupon.numbers = numbers;
        }
        if let Some(user_id) = update.user_id {
            coupon.user_id = user_id;
        }
        if let Some(draw_ids) = draw_ids {
            coupon.draw_ids = draw_ids;
        }

        let event = DbEvent::CouponUpdated(coupon_written(coupon));
        Ok((coupon.clone(), event))
    }

    pub fn delete_coupon(&mut self, id: u64) -> Result<Written<Coupon>, StoreError> {
        let coupon = self.coupons.remove(&id).ok_or(StoreError::CouponNotFound)?;
        let event = DbEvent::CouponDeleted(CouponDeletedEvent {
            coupon_id: id,
            timestamp: Utc::now(),
        });
        Ok((coupon, event))
    }

    pub fn coupon_results(&self, id: u64) -> Result<(Coupon, Vec<DrawResult>), StoreError> {
        let coupon = self.get_coupon(id)?;
        let results = ticket_results(&coupon, &self.draws);
        Ok((coupon, results))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.list_users(),
            draws: self.list_draws(),
            coupons: self.list_coupons(),
            last_ids: IdWatermarks {
                user: self.last_user_id,
                draw: self.last_draw_id,
                coupon: self.last_coupon_id,
            },
        }
    }

    /// Replaces the whole state. Id counters continue after the snapshot's
    /// watermarks or the highest restored id, whichever is larger.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.users = snapshot.users.into_iter().map(|u| (u.id, u)).collect();
        self.draws = snapshot.draws.into_iter().map(|d| (d.id, d)).collect();
        self.coupons = snapshot.coupons.into_iter().map(|c| (c.id, c)).collect();

        let last = snapshot.last_ids;
        self.last_user_id = highest_key(&self.users).max(last.user);
        self.last_draw_id = highest_key(&self.draws).max(last.draw);
        self.last_coupon_id = highest_key(&self.coupons).max(last.coupon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::validator::validate_numbers;
    use crate::types::user_types::Role;
    use chrono::TimeZone;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jan".into(),
            email: email.into(),
            password: "hash".into(),
            role: Role::User,
        }
    }

    fn pick() -> TicketNumbers {
        validate_numbers(&[1, 2, 3, 4, 5, 6]).unwrap()
    }

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 20, 0, 0).unwrap()
    }

    #[test]
    fn ids_are_sequential_per_collection() {
        let mut state = LotteryState::default();
        let (a, _) = state.add_user(new_user("a@example.com")).unwrap();
        let (b, _) = state.add_user(new_user("b@example.com")).unwrap();
        let (d, _) = state.create_draw(date(1));
        assert_eq!((a.id, b.id, d.id), (1, 2, 1));
    }

    #[test]
    fn email_is_unique_ignoring_case() {
        let mut state = LotteryState::default();
        state.add_user(new_user("jan@example.com")).unwrap();
        assert_eq!(
            state.add_user(new_user("JAN@example.com")).unwrap_err(),
            StoreError::EmailTaken
        );
        assert_eq!(state.get_user_by_email("Jan@Example.com").unwrap().id, 1);
    }

    #[test]
    fn update_user_rejects_someone_elses_email() {
        let mut state = LotteryState::default();
        state.add_user(new_user("a@example.com")).unwrap();
        state.add_user(new_user("b@example.com")).unwrap();

        let taken = UserUpdate {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        assert_eq!(state.update_user(2, taken).unwrap_err(), StoreError::EmailTaken);

        let own = UserUpdate {
            email: Some("B@example.com".into()),
            role: Some(Role::Admin),
            ..Default::default()
        };
        let (user, event) = state.update_user(2, own).unwrap();
        assert_eq!(user.email, "B@example.com");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(event.name(), "user_updated");
    }

    #[test]
    fn purchase_requires_open_existing_draws() {
        let mut state = LotteryState::default();
        state.add_user(new_user("a@example.com")).unwrap();
        let (open, _) = state.create_draw(date(2));
        let (done, _) = state.create_draw(date(1));
        state
            .update_draw(
                done.id,
                DrawUpdate {
                    winning_numbers: Some(pick()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(
            state.create_coupon(1, pick(), vec![]).unwrap_err(),
            StoreError::NoDraws
        );
        assert_eq!(
            state.create_coupon(1, pick(), vec![open.id, 42]).unwrap_err(),
            StoreError::DrawNotFound(42)
        );
        assert_eq!(
            state.create_coupon(1, pick(), vec![done.id]).unwrap_err(),
            StoreError::DrawCompleted(done.id)
        );
        assert_eq!(
            state.create_coupon(9, pick(), vec![open.id]).unwrap_err(),
            StoreError::UserNotFound
        );

        let (coupon, event) = state.create_coupon(1, pick(), vec![open.id, open.id]).unwrap();
        assert_eq!(coupon.draw_ids, vec![open.id]);
        assert_eq!(event.name(), "coupon_created");
    }

    #[test]
    fn admin_coupon_edit_may_attach_completed_draws() {
        let mut state = LotteryState::default();
        state.add_user(new_user("a@example.com")).unwrap();
        state.add_user(new_user("b@example.com")).unwrap();
        let (open, _) = state.create_draw(date(2));
        let (coupon, _) = state.create_coupon(1, pick(), vec![open.id]).unwrap();
        let (done, _) = state.create_draw(date(1));
        state
            .update_draw(
                done.id,
                DrawUpdate {
                    winning_numbers: Some(pick()),
                    ..Default::default()
                },
            )
            .unwrap();

        let update = CouponUpdate {
            user_id: Some(2),
            draw_ids: Some(vec![done.id, open.id]),
            numbers: Some(validate_numbers(&[10, 20, 30, 40, 41, 42]).unwrap()),
        };
        let (updated, _) = state.update_coupon(coupon.id, update).unwrap();
        assert_eq!(updated.user_id, 2);
        assert_eq!(updated.draw_ids, vec![open.id, done.id]);
        assert_eq!(updated.numbers.as_slice(), &[10, 20, 30, 40, 41, 42]);
    }

    #[test]
    fn deleting_a_user_removes_their_coupons() {
        let mut state = LotteryState::default();
        state.add_user(new_user("a@example.com")).unwrap();
        state.add_user(new_user("b@example.com")).unwrap();
        let (draw, _) = state.create_draw(date(3));
        state.create_coupon(1, pick(), vec![draw.id]).unwrap();
        state.create_coupon(2, pick(), vec![draw.id]).unwrap();

        state.delete_user(1).unwrap();
        let remaining = state.list_coupons();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, 2);
        assert!(state.list_user_coupons(1).is_empty());
    }

    #[test]
    fn deleting_a_draw_detaches_it() {
        let mut state = LotteryState::default();
        state.add_user(new_user("a@example.com")).unwrap();
        let (first, _) = state.create_draw(date(3));
        let (second, _) = state.create_draw(date(4));
        let (coupon, _) = state
            .create_coupon(1, pick(), vec![first.id, second.id])
            .unwrap();

        let (_, event) = state.delete_draw(first.id).unwrap();
        assert_eq!(event.name(), "draw_deleted");
        assert_eq!(state.get_coupon(coupon.id).unwrap().draw_ids, vec![second.id]);
        assert_eq!(
            state.get_draw(first.id).unwrap_err(),
            StoreError::DrawNotFound(first.id)
        );
    }

    #[test]
    fn results_settle_once_the_draw_completes() {
        let mut state = LotteryState::default();
        state.add_user(new_user("a@example.com")).unwrap();
        let (draw, _) = state.create_draw(date(5));
        let (coupon, _) = state.create_coupon(1, pick(), vec![draw.id]).unwrap();

        let (_, pending) = state.coupon_results(coupon.id).unwrap();
        assert_eq!(pending[0].matched_numbers, None);

        state
            .update_draw(
                draw.id,
                DrawUpdate {
                    winning_numbers: Some(validate_numbers(&[1, 2, 3, 7, 8, 9]).unwrap()),
                    ..Default::default()
                },
            )
            .unwrap();
        let (_, settled) = state.coupon_results(coupon.id).unwrap();
        assert_eq!(settled[0].matched_numbers, Some(3));
        assert_eq!(settled[0].prize, Some(100));
    }

    #[test]
    fn restore_continues_id_sequences() {
        let mut source = LotteryState::default();
        source.add_user(new_user("a@example.com")).unwrap();
        source.add_user(new_user("b@example.com")).unwrap();
        source.delete_user(1).unwrap();
        let (draw, _) = source.create_draw(date(6));
        source.create_coupon(2, pick(), vec![draw.id]).unwrap();

        let mut restored = LotteryState::default();
        restored.restore(source.snapshot());
        let (user, _) = restored.add_user(new_user("c@example.com")).unwrap();
        let (next_draw, _) = restored.create_draw(date(7));
        assert_eq!(user.id, 3);
        assert_eq!(next_draw.id, 2);
        assert_eq!(restored.list_coupons().len(), 1);
    }

    #[test]
    fn deleted_highest_ids_are_not_reused_after_restore() {
        let mut source = LotteryState::default();
        source.add_user(new_user("a@example.com")).unwrap();
        source.add_user(new_user("b@example.com")).unwrap();
        source.delete_user(2).unwrap();
        let (draw, _) = source.create_draw(date(6));
        source.delete_draw(draw.id).unwrap();

        let snapshot = source.snapshot();
        assert_eq!(snapshot.last_ids.user, 2);
        assert_eq!(snapshot.last_ids.draw, 1);

        let mut restored = LotteryState::default();
        restored.restore(snapshot);
        let (user, _) = restored.add_user(new_user("c@example.com")).unwrap();
        let (next_draw, _) = restored.create_draw(date(7));
        assert_eq!(user.id, 3);
        assert_eq!(next_draw.id, 2);
    }

    #[test]
    fn restore_without_watermarks_falls_back_to_highest_id() {
        let mut source = LotteryState::default();
        source.add_user(new_user("a@example.com")).unwrap();
        let mut snapshot = source.snapshot();
        snapshot.last_ids = IdWatermarks::default();

        let mut restored = LotteryState::default();
        restored.restore(snapshot);
        let (user, _) = restored.add_user(new_user("b@example.com")).unwrap();
        assert_eq!(user.id, 2);
    }
}
