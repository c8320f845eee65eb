pub mod error_toast;
pub mod menu_bar;
pub mod prompt_bar;
pub mod status;
pub mod viewport;
