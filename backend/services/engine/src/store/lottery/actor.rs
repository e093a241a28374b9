use log::info;
use tokio::sync::mpsc;

use crate::store::lottery::api::LotteryStore;
use crate::store::lottery::commands::Command;
use crate::store::lottery::state::{LotteryState, Written};
use crate::types::db_event_types::{DbEventSink, DiscardEvents};
use crate::types::store_types::StoreError;

const COMMAND_BUFFER: usize = 1000;

/// Store without persistence: events are discarded.
pub fn spawn_lottery_actor() -> LotteryStore {
    spawn_lottery_actor_with_sink(DiscardEvents)
}

/// Store that hands each applied change to `events` before replying.
pub fn spawn_lottery_actor_with_sink<E: DbEventSink>(events: E) -> LotteryStore {
    let (tx, mut rx) = mpsc::channel::<Command>(COMMAND_BUFFER);

    tokio::spawn(async move {
        let mut state = LotteryState::default();

        while let Some(cmd) = rx.recv().await {
            handle_command(&mut state, &events, cmd);
        }

        info!("Lottery store stopped: all handles dropped");
    });

    LotteryStore::new(tx)
}

fn commit<T, E: DbEventSink>(events: &E, written: Result<Written<T>, StoreError>) -> Result<T, StoreError> {
    written.map(|(value, event)| {
        events.publish(event);
        value
    })
}

fn handle_command<E: DbEventSink>(state: &mut LotteryState, events: &E, cmd: Command) {
    // A dropped receiver means the caller gave up waiting; nothing to do.
    match cmd {
        Command::AddUser(user, reply) => {
            let _ = reply.send(commit(events, state.add_user(user)));
        }
        Command::GetUser(id, reply) => {
            let _ = reply.send(state.get_user(id));
        }
        Command::GetUserByEmail(email, reply) => {
            let _ = reply.send(state.get_user_by_email(&email));
        }
        Command::ListUsers(reply) => {
            let _ = reply.send(Ok(state.list_users()));
        }
        Command::UpdateUser(id, update, reply) => {
            let _ = reply.send(commit(events, state.update_user(id, update)));
        }
        Command::DeleteUser(id, reply) => {
            let _ = reply.send(commit(events, state.delete_user(id)));
        }

        Command::CreateDraw(draw_date, reply) => {
            let _ = reply.send(commit(events, Ok(state.create_draw(draw_date))));
        }
        Command::GetDraw(id, reply) => {
            let _ = reply.send(state.get_draw(id));
        }
        Command::ListDraws(reply) => {
            let _ = reply.send(Ok(state.list_draws()));
        }
        Command::UpdateDraw(id, update, reply) => {
            let _ = reply.send(commit(events, state.update_draw(id, update)));
        }
        Command::DeleteDraw(id, reply) => {
            let _ = reply.send(commit(events, state.delete_draw(id)));
        }

        Command::CreateCoupon(user_id, numbers, draw_ids, reply) => {
            let written = state.create_coupon(user_id, numbers, draw_ids);
            let _ = reply.send(commit(events, written));
        }
        Command::GetCoupon(id, reply) => {
            let _ = reply.send(state.get_coupon(id));
        }
        Command::ListCoupons(reply) => {
            let _ = reply.send(Ok(state.list_coupons()));
        }
        Command::ListUserCoupons(user_id, reply) => {
            let _ = reply.send(Ok(state.list_user_coupons(user_id)));
        }
        Command::UpdateCoupon(id, update, reply) => {
            let _ = reply.send(commit(events, state.update_coupon(id, update)));
        }
        Command::DeleteCoupon(id, reply) => {
            let _ = reply.send(commit(events, state.delete_coupon(id)));
        }
        Command::CouponResults(id, reply) => {
            let _ = reply.send(state.coupon_results(id));
        }

        Command::Snapshot(reply) => {
            let _ = reply.send(Ok(state.snapshot()));
        }
        Command::Restore(snapshot, reply) => {
            state.restore(snapshot);
            let _ = reply.send(Ok(()));
        }
    }
}
