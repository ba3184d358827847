pub mod cipher;
pub mod discover;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod policy;
pub mod probe;
pub mod report;
pub mod util;
