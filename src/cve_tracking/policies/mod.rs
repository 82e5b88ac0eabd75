pub mod codename_table;
pub mod fix_status;

pub use codename_table::{CodenameTable, CodenameTables, DEBIAN_CODENAMES, UBUNTU_CODENAMES};
pub use fix_status::{redhat_platform_cpe, FixStatus, RedHatUnfixedPolicy, StatusSet};
