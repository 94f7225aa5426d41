pub mod human;
pub mod timer;

pub use human::HumanMode;
pub use timer::TickTimer;
