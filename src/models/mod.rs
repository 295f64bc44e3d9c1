pub mod alert;
pub mod analysis;
pub mod assessment;
pub mod case;
pub mod enums;
pub mod severity;

pub use alert::*;
pub use analysis::*;
pub use assessment::*;
pub use case::*;
pub use severity::*;
