pub mod analysis;
pub mod cases;
pub mod health;
pub mod overview;
