mod domain;
pub use domain::{DelayMs, Step};

mod error;
pub use error::{ModelError, ModelResult};

mod options;
pub use options::ExponentialOptions;
