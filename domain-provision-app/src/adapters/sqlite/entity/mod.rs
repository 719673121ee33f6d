//! `SeaORM` entities for the sqlite store.

pub mod domain_record;
