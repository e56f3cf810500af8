//! Diesel schema for customer persistence.

diesel::table! {
    /// Customer records keyed by case-folded name.
    customers (id) {
        /// Internal customer identifier.
        id -> Uuid,
        /// Display name as first seen.
        #[max_length = 255]
        name -> Varchar,
        /// Case-folded name; unique.
        #[max_length = 255]
        name_key -> Varchar,
        /// Optional phone number.
        #[max_length = 50]
        phone -> Nullable<Varchar>,
        /// Optional postal code.
        #[max_length = 20]
        postal -> Nullable<Varchar>,
        /// City.
        #[max_length = 100]
        city -> Varchar,
        /// Province.
        #[max_length = 50]
        province -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
