pub use crate::alignment::similarity_transform;
pub use crate::buffer::SolutionBuffer;
pub use crate::linear_system::LinearSystem;
