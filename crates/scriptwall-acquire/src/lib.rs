pub mod cache;
pub mod daily_script;
pub mod normalize;
pub mod types;
