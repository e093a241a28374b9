pub mod auth_types;
pub mod coupon_types;
pub mod draw_types;
pub mod user_types;
