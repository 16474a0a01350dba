//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. The text
//! columns hold codec output and are never interpreted by SQL.

diesel::table! {
    /// Library members.
    users (id) {
        /// Storage-assigned serial identifier.
        id -> Int4,
        /// Member name (max 255 characters).
        name -> Varchar,
        /// Comma-joined ids of books currently held.
        borrowed_books -> Nullable<Text>,
        /// Comma-joined ids of every book returned, repeats included.
        returned_books -> Nullable<Text>,
    }
}

diesel::table! {
    /// Lendable books.
    books (id) {
        /// Storage-assigned serial identifier.
        id -> Int4,
        /// Book title (max 255 characters).
        name -> Varchar,
        /// Rating ledger; comma-joined, or a JSON array in legacy rows.
        scores -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, books);
