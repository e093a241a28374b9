pub mod coupon_model;
pub mod draw_model;
pub mod user_model;
pub mod watermark_model;
