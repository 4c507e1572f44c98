pub mod fetch_data;
pub mod get_data;
