pub mod get_profile;
pub mod get_stats;
