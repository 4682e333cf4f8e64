//! Diesel schema for task persistence.

diesel::table! {
    /// Local tasks mirrored as remote issues.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Trimmed task title.
        #[max_length = 250]
        title -> Varchar,
        /// Task status literal.
        #[max_length = 20]
        status -> Varchar,
        /// Mirrored issue number, unique per project when present.
        issue_number -> Nullable<Int8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp, set iff the status is `Done`.
        completed_at -> Nullable<Timestamptz>,
    }
}
