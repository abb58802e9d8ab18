mod error;
mod record;
mod schema;
mod traits;

pub use error::{Result, StorageError};
pub use record::{
    document_id, from_document, index_key, resolve_index, set_document_id, stamp_created,
    stamp_updated, to_document, Document, Record, RecordId, CREATED_AT_FIELD, ID_FIELD,
    UPDATED_AT_FIELD,
};
pub use schema::{Collection, IndexSpec, SCHEMA_VERSION};
pub use traits::StorageEngine;
