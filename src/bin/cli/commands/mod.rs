pub mod add;
pub mod edit;
pub mod list;
pub mod remind;
pub mod rm;
pub mod settings;
pub mod show;
