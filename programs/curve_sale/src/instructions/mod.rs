pub mod init_config;
pub mod init_curve;
pub mod trade;
pub mod update_config;
pub mod withdraw;

pub use init_config::*;
pub use init_curve::*;
pub use trade::*;
pub use update_config::*;
pub use withdraw::*;
