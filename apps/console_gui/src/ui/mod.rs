pub mod app;
pub mod badge;
pub mod pages;
pub mod previews;
pub mod widgets;
