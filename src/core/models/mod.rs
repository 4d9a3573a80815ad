//! Data models for `correlativas`

pub mod course;
pub mod curriculum;
pub mod dag;
pub mod node;
pub mod year;

pub use course::{Category, Course, Position, RawCourse, Term};
pub use curriculum::{Curriculum, RawPlan};
pub use dag::{Edge, Reachability, DAG};
pub use node::Node;
pub use year::Year;
