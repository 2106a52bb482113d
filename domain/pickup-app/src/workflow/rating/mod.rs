pub mod history;
pub mod rate;
