//! SQLite schema definitions and SQL query builders.
//!
//! Every collection becomes a table holding the JSON document in `data`
//! and the identifier in `id`. Secondary indexes are expression indexes over
//! `json_extract`, so lookups must use the exact same expression text.
//! Table and index names come from the fixed collection definitions, never
//! from user input.

use campcheck_core::storage::{Collection, IndexSpec};

/// `json_extract` expression for one document field.
pub fn field_expr(field: &str) -> String {
    format!("json_extract(data, '$.{field}')")
}

/// SQLite name of a collection index.
pub fn index_name(collection: Collection, index: &IndexSpec) -> String {
    format!("idx_{}_{}", collection.name(), index.name)
}

pub fn create_table_sql(collection: Collection) -> String {
    let key = if collection.auto_increment() {
        "INTEGER PRIMARY KEY AUTOINCREMENT"
    } else {
        "INTEGER PRIMARY KEY"
    };
    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" (\n    id {key},\n    data TEXT NOT NULL\n);\n",
        collection.name()
    )
}

pub fn create_index_sql(collection: Collection, index: &IndexSpec) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    let columns = index
        .key_path
        .iter()
        .map(|field| field_expr(field))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE {unique}INDEX IF NOT EXISTS \"{}\" ON \"{}\" ({columns});\n",
        index_name(collection, index),
        collection.name()
    )
}

/// Full schema: every table followed by its indexes.
pub fn create_schema_sql() -> String {
    let mut sql = String::new();
    for collection in Collection::ALL {
        sql.push_str(&create_table_sql(collection));
        for index in collection.indexes() {
            sql.push_str(&create_index_sql(collection, index));
        }
    }
    sql
}

pub fn select_all_sql(collection: Collection) -> String {
    format!("SELECT id, data FROM \"{}\" ORDER BY id", collection.name())
}

pub fn select_by_id_sql(collection: Collection) -> String {
    format!("SELECT id, data FROM \"{}\" WHERE id = ?1", collection.name())
}

pub fn select_by_index_sql(collection: Collection, index: &IndexSpec) -> String {
    let conditions = index
        .key_path
        .iter()
        .enumerate()
        .map(|(i, field)| format!("{} = ?{}", field_expr(field), i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!(
        "SELECT id, data FROM \"{}\" WHERE {conditions} ORDER BY id",
        collection.name()
    )
}

pub fn insert_sql(collection: Collection) -> String {
    format!("INSERT INTO \"{}\" (data) VALUES (?1)", collection.name())
}

pub fn insert_with_id_sql(collection: Collection) -> String {
    format!("INSERT INTO \"{}\" (id, data) VALUES (?1, ?2)", collection.name())
}

pub fn update_sql(collection: Collection) -> String {
    format!("UPDATE \"{}\" SET data = ?2 WHERE id = ?1", collection.name())
}

pub fn upsert_sql(collection: Collection) -> String {
    format!(
        "INSERT INTO \"{}\" (id, data) VALUES (?1, ?2) \
         ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        collection.name()
    )
}

pub fn delete_sql(collection: Collection) -> String {
    format!("DELETE FROM \"{}\" WHERE id = ?1", collection.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_every_table() {
        let sql = create_schema_sql();
        for collection in Collection::ALL {
            assert!(sql.contains(&format!(
                "CREATE TABLE IF NOT EXISTS \"{}\"",
                collection.name()
            )));
        }
    }

    #[test]
    fn test_settings_table_is_explicitly_keyed() {
        let sql = create_table_sql(Collection::Settings);
        assert!(sql.contains("id INTEGER PRIMARY KEY,"));
        assert!(!sql.contains("AUTOINCREMENT"));
    }

    #[test]
    fn test_composite_unique_index() {
        let index = Collection::ModuleEquipment.index("moduleEquipment").unwrap();
        let sql = create_index_sql(Collection::ModuleEquipment, index);

        assert_eq!(
            sql,
            "CREATE UNIQUE INDEX IF NOT EXISTS \"idx_moduleEquipment_moduleEquipment\" \
             ON \"moduleEquipment\" (json_extract(data, '$.moduleId'), \
             json_extract(data, '$.equipmentId'));\n"
        );
    }

    #[test]
    fn test_select_by_index_uses_index_expressions() {
        let index = Collection::ModuleEquipment.index("moduleEquipment").unwrap();
        let sql = select_by_index_sql(Collection::ModuleEquipment, index);

        assert!(sql.contains("json_extract(data, '$.moduleId') = ?1"));
        assert!(sql.contains("json_extract(data, '$.equipmentId') = ?2"));
    }

    #[test]
    fn test_upsert_conflicts_on_id_only() {
        let sql = upsert_sql(Collection::Settings);
        assert!(sql.contains("ON CONFLICT(id) DO UPDATE"));
    }
}
