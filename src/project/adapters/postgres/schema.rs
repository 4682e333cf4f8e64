//! Diesel schema for project persistence.

diesel::table! {
    /// Projects and the repository each one mirrors.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 150]
        name -> Varchar,
        /// Repository owner login.
        #[max_length = 100]
        repo_owner -> Varchar,
        /// Repository name.
        #[max_length = 100]
        repo_name -> Varchar,
        /// Protected integration token.
        protected_token -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
