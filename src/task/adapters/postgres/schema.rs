//! Diesel schema for task persistence.

diesel::table! {
    /// Task records keyed by identifier.
    tasks (id) {
        /// Task identifier.
        id -> Text,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Priority.
        #[max_length = 16]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Optional due timestamp.
        due_date -> Nullable<Timestamptz>,
    }
}
