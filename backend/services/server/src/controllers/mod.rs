pub mod admin_coupon_controller;
pub mod admin_draw_controller;
pub mod admin_user_controller;
pub mod coupon_controller;
pub mod draw_controller;
pub mod user_controller;
