pub mod attendance;
pub mod day_status;
pub mod media;
pub mod shift;
