pub mod lottery;
pub mod matching;
pub mod prize;
pub mod results;
pub mod validator;
