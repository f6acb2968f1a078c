//! Small numeric helpers shared by the model, the validators and the codecs.

mod math;

pub use math::{align_up, is_power_of_two, is_power_of_two_in_range, next_power_of_two};
