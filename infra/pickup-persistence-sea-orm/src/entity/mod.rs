pub mod match_player;
pub mod r#match;
pub mod rating;
pub mod user;
