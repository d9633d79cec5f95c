pub mod chart;
pub mod pair;
pub mod quote;
pub mod range;
pub mod rate;
pub mod series;
pub mod settings;
pub mod window;
