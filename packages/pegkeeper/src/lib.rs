pub mod helpers;
pub mod math;
pub mod peg_keeper;
pub mod pegged_token;
pub mod stable_pool;
pub mod types;
