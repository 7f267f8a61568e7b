//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Singleton site-owner record. Exactly one row after bootstrap.
    profiles (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Varchar,
        name -> Varchar,
        email -> Varchar,
        role -> Varchar,
        location -> Varchar,
        github -> Nullable<Varchar>,
        twitter -> Nullable<Varchar>,
        linkedin -> Nullable<Varchar>,
        skills -> Array<Text>,
        education -> Jsonb,
        resume_url -> Nullable<Varchar>,
        profile_picture -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills owned by the profile; level constrained to [0, 100].
    skills (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        level -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Portfolio projects; global, listed newest first.
    projects (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        image -> Varchar,
        tags -> Array<Text>,
        live_link -> Nullable<Varchar>,
        code_link -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact inbox; status constrained to the triage enum.
    contact_messages (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        subject -> Varchar,
        message -> Text,
        status -> Varchar,
        notification_sent -> Bool,
        notification_email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(skills -> profiles (owner_id));

diesel::allow_tables_to_appear_in_same_query!(profiles, skills, projects, contact_messages);
