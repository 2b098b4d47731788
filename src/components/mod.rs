pub mod banner;
pub mod nav_bar;
pub mod spinner;
pub mod toast;
