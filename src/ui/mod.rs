pub mod day_view;
pub mod month_view;
pub mod style;
pub mod week_view;
