//! CLI command implementations.
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `submit` | `Submit`         |
//! | `config` | `Config`         |

pub mod config;
pub mod submit;

pub use config::cmd_config;
pub use submit::cmd_submit;
