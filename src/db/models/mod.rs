mod press;

pub use press::PressEvent;
