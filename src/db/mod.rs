pub mod init;
pub mod qso;

pub use init::{connect, count_rows};
pub use qso::{apply_update, fetch_candidates, LogRow};
