pub mod coupon_types;
pub mod db_event_types;
pub mod draw_types;
pub mod result_types;
pub mod store_types;
pub mod ticket_types;
pub mod user_types;
