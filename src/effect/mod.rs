pub mod clock;
pub mod frame;
pub mod sample;
pub mod threshold;
