//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` when a migration changes.

diesel::table! {
    /// Monitored rivers; `code` carries a unique index.
    rivers (id) {
        id -> Int4,
        name -> Varchar,
        code -> Varchar,
        description -> Text,
    }
}

diesel::table! {
    /// Measurement types.
    parameters (id) {
        id -> Int4,
        name -> Varchar,
        category -> Varchar,
    }
}

diesel::table! {
    /// Sampling events. Deleting a river with collections is restricted.
    collections (id) {
        id -> Int4,
        code -> Varchar,
        location -> Varchar,
        river_id -> Int4,
        sampled_on -> Date,
        latitude -> Float8,
        longitude -> Float8,
    }
}

diesel::table! {
    /// Join rows holding one measured value. Cascades from both parents.
    collection_parameters (id) {
        id -> Int4,
        collection_id -> Int4,
        parameter_id -> Int4,
        value -> Float8,
    }
}

diesel::table! {
    /// Registered users; `email` carries a unique index.
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
    }
}

diesel::joinable!(collections -> rivers (river_id));
diesel::joinable!(collection_parameters -> collections (collection_id));
diesel::joinable!(collection_parameters -> parameters (parameter_id));

diesel::allow_tables_to_appear_in_same_query!(
    rivers,
    parameters,
    collections,
    collection_parameters,
    users,
);
