pub mod list;
pub mod request_join;
pub mod set_status;
