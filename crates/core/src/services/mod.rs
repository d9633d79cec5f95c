pub mod bucketizer;
pub mod clock;
pub mod date_window;
pub mod range_controller;
