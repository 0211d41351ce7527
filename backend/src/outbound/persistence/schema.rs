//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` is unique.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        email -> Varchar,
        /// `student` or `educator`; enforced by a check constraint.
        role -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course documents with embedded lesson and enrollment references.
    courses (id) {
        id -> Uuid,
        /// Insertion sequence; breaks `created_at` ties.
        created_seq -> Int8,
        title -> Text,
        description -> Text,
        thumbnail -> Text,
        educator_id -> Uuid,
        lesson_ids -> Array<Uuid>,
        enrolled_student_ids -> Array<Uuid>,
        is_published -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    lessons (id) {
        id -> Uuid,
        /// Insertion sequence; defines creation order.
        created_seq -> Int8,
        course_id -> Uuid,
        title -> Text,
        video_url -> Text,
        /// Caller-supplied `order`.
        position -> Int4,
        duration_seconds -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> users (educator_id));
diesel::joinable!(lessons -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(users, courses, lessons);
