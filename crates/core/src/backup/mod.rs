mod parse;
mod types;

pub use parse::{check_required_fields, parse_backup, BackupFormatError};
pub use types::{backup_file_name, BackupDocument, ImportMode, BACKUP_FORMAT_VERSION};
