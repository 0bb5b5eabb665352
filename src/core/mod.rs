pub mod clock;
pub mod gpu_context;
pub mod timer;

pub use clock::{Clock, VirtualClock};
pub use gpu_context::GpuContext;
pub use timer::{FpsCounter, Throttled};
