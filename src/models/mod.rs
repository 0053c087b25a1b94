pub mod attendance;
pub mod attendance_type;
pub mod status;
pub mod worker;
