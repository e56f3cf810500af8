//! Diesel schema for package persistence.

diesel::table! {
    /// Package records and their pickup lifecycle.
    packages (id) {
        /// Internal package identifier.
        id -> Uuid,
        /// Delivering courier.
        #[max_length = 100]
        courier -> Varchar,
        /// Tracking number.
        #[max_length = 100]
        tracking -> Varchar,
        /// Linked customer, if resolved.
        customer_id -> Nullable<Uuid>,
        /// Recipient name snapshot.
        #[max_length = 255]
        name -> Varchar,
        /// Recipient phone snapshot.
        #[max_length = 50]
        phone -> Nullable<Varchar>,
        /// Postal code snapshot.
        #[max_length = 20]
        postal -> Varchar,
        /// Label image content address.
        #[max_length = 80]
        label_image -> Nullable<Varchar>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Receiving staff member.
        #[max_length = 100]
        created_by -> Nullable<Varchar>,
        /// Receipt timestamp.
        created_at -> Timestamptz,
        /// Last change timestamp.
        updated_at -> Timestamptz,
        /// Pickup timestamp.
        signed_at -> Nullable<Timestamptz>,
        /// Signature image content address.
        #[max_length = 80]
        signature_image -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Pickup visits and the identification shown.
    pickups (id) {
        /// Pickup identifier.
        id -> Uuid,
        /// Customer whose packages were collected.
        customer_id -> Uuid,
        /// Recipient name snapshot.
        #[max_length = 255]
        customer_name -> Varchar,
        /// Person who collected the packages.
        #[max_length = 255]
        collector_name -> Varchar,
        /// Kind of identification shown.
        #[max_length = 50]
        id_type -> Nullable<Varchar>,
        /// Identification number shown.
        #[max_length = 100]
        id_number -> Nullable<Varchar>,
        /// Signature image content address.
        #[max_length = 80]
        signature_image -> Nullable<Varchar>,
        /// Packages collected in this visit.
        package_ids -> Array<Uuid>,
        /// Pickup timestamp.
        picked_up_at -> Timestamptz,
    }
}
