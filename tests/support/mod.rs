pub mod evalview_env;
pub mod reports;
