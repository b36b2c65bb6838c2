//! Controller layer: form events feeding the check-in controller.

pub mod events;
