pub mod api_json;
pub mod current_user;
