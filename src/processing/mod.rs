mod transform;

pub use transform::{CommandTransform, Transform};
