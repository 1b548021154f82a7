pub mod app;
pub mod events;
pub mod scheduler;
pub mod theme;
pub mod widgets;
